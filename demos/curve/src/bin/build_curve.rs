use chrono::NaiveDate;
use rate_curves::prelude::*;
use std::io::{self, BufRead, Write};

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more input")),
    }
}

fn prompt_number<T: std::str::FromStr>(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> io::Result<T> {
    loop {
        let answer = prompt(lines, text)?;
        match answer.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("'{answer}' is not a number"),
        }
    }
}

fn prompt_yes(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> io::Result<bool> {
    let answer = prompt(lines, text)?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let config = Config::new();
    info!("Using database {}", config.database.url);
    let store = Arc::new(open_or_create(&config.database).await?);
    store.get_statistics().await?.print_summary();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let day: u32 = prompt_number(&mut lines, "Curve day: ")?;
    let month: u32 = prompt_number(&mut lines, "Curve month: ")?;
    let year: i32 = prompt_number(&mut lines, "Curve year: ")?;
    let curve_date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::InvalidInput(format!("{day}/{month}/{year} is not a date")))?;

    let service = CurveService::new(store.clone(), config.bootstrap);
    let curve = match service.build(&config.default_curve, curve_date).await {
        Ok(curve) => curve,
        Err(e) => {
            error!("Cannot build {} on {}: {}", config.default_curve, curve_date, e);
            let dates = store.available_dates(&config.default_curve).await?;
            if !dates.is_empty() {
                let dates: Vec<String> = dates.iter().map(NaiveDate::to_string).collect();
                info!("Quotes are available on {}", dates.join(", "));
            }
            return Err(e.into());
        }
    };

    for (name, error) in curve.repricing_errors() {
        debug!("{name}: repricing error {error:.3e}");
    }

    if prompt_yes(&mut lines, "Export the curve? (y/n) ")? {
        let path = export_csv(&curve, config.output_path())?;
        let build_id = store.store_curve(&curve).await?;
        println!("Curve written to {} and stored as build {}", path.display(), build_id);
    }

    if prompt_yes(&mut lines, "Print the discount factors? (y/n) ")? {
        println!("{}", CurveTable::new(&curve));
    }

    if prompt_yes(&mut lines, "Query a date? (y/n) ")? {
        let day: u32 = prompt_number(&mut lines, "Day: ")?;
        let month: u32 = prompt_number(&mut lines, "Month: ")?;
        let year: i32 = prompt_number(&mut lines, "Year: ")?;
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => match curve.discount_factor(date) {
                Ok(df) => println!("Discount factor on {date}: {df:.10}"),
                Err(e) => println!("{e}"),
            },
            None => println!("{day}/{month}/{year} is not a date"),
        }
    }

    Ok(())
}
