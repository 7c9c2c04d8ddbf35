mod test_bootstrap;
mod test_interpolation;
