pub trait ToDashSeparators {
    /// Returns a copy with all `/` replaced by `-` and leading/trailing
    /// whitespace trimmed.
    fn to_dash_separators(&self) -> String;
}

impl ToDashSeparators for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace('/', "-")
    }
}

impl ToDashSeparators for String {
    fn to_dash_separators(&self) -> String {
        self.as_str().to_dash_separators()
    }
}

pub trait KeyName {
    /// Lower-cased key name with any `arrow` prefix dropped, so
    /// "ArrowLeft", "arrow-left" and "left" all read as "left".
    fn to_key_name(&self) -> String;
}

impl KeyName for str {
    fn to_key_name(&self) -> String {
        let lowered = self.trim().to_ascii_lowercase();
        let stripped = lowered.strip_prefix("arrow").unwrap_or(&lowered);
        stripped.trim_start_matches(['-', '_']).to_string()
    }
}
