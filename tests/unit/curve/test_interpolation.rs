use rate_curves::curve::Interpolation;
use rate_curves::curve::interpolation::Interpolant;

#[test]
fn test_parse_interpolation_names() {
    assert_eq!("Linear".parse::<Interpolation>().unwrap(), Interpolation::Linear);
    assert_eq!("LogLinear".parse::<Interpolation>().unwrap(), Interpolation::LogLinear);
    assert_eq!("CubicZero".parse::<Interpolation>().unwrap(), Interpolation::CubicSpline);
    assert!("spline5".parse::<Interpolation>().is_err());
    assert_eq!(Interpolation::default(), Interpolation::CubicSpline);
}

#[test]
fn test_linear_between_and_outside_nodes() {
    let f = Interpolant::linear(vec![0.0, 1.0, 3.0], vec![1.0, 2.0, 6.0]).unwrap();
    assert_eq!(f.value(0.5), 1.5);
    assert_eq!(f.value(2.0), 4.0);
    assert_eq!(f.value(-1.0), 1.0);
    assert_eq!(f.value(10.0), 6.0);
}

#[test]
fn test_spline_reproduces_nodes_and_lines() {
    let xs = vec![0.0, 1.0, 2.5, 4.0];
    let line: Vec<f64> = xs.iter().map(|x| 0.01 + 0.002 * x).collect();
    let f = Interpolant::cubic_spline(xs.clone(), line).unwrap();
    for x in [0.0, 0.3, 1.0, 1.7, 2.5, 3.9] {
        assert!((f.value(x) - (0.01 + 0.002 * x)).abs() < 1e-15);
    }
}

#[test]
fn test_spline_set_value_refits() {
    let mut f = Interpolant::cubic_spline(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]).unwrap();
    f.set_value(1, 1.0);
    assert!((f.value(1.0) - 1.0).abs() < 1e-15);
    assert!(f.value(0.5) > 0.5);
}

#[test]
fn test_invalid_nodes() {
    assert!(Interpolant::linear(vec![0.0], vec![1.0]).is_err());
    assert!(Interpolant::linear(vec![0.0, 0.0], vec![1.0, 2.0]).is_err());
    assert!(Interpolant::cubic_spline(vec![0.0, 1.0], vec![1.0]).is_err());
}
