/// Expand `~`, `$VAR` and `${VAR}`; returns the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unset_variable_when_expanding_then_returns_input() {
        let input = "$WMSLOC_SURELY_UNSET_VARIABLE/locations.toml";
        assert_eq!(expand_env_vars(input), input);
    }

    #[test]
    fn given_plain_path_when_expanding_then_unchanged() {
        assert_eq!(expand_env_vars("data/locations.toml"), "data/locations.toml");
    }
}
