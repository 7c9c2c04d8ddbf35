/// Generates a curve build identifier.
///
/// The identifier is 30 characters of uppercase letters (`A-Z`) and digits
/// (`0-9`) drawn with `nanoid`, so every stored build gets its own key in
/// the `curve_outputs` table.
///
/// # Returns
/// - `Some(String)` with the identifier
///
/// # Examples
/// ```
/// use rate_curves::utils::id::get_id;
/// let build_id = get_id();
/// if let Some(id) = build_id {
///     assert_eq!(id.len(), 30);
/// }
/// ```
pub fn get_id() -> Option<String> {
    let alphabet: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".chars().collect();
    Some(nanoid::nanoid!(30, &alphabet))
}
