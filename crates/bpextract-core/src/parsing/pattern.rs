use crate::error::BpError;
use regex::{Captures, Regex};

/// Group names recognised in a custom extraction pattern, in column order.
pub const GROUP_NAMES: [&str; 5] = ["date", "time", "systolic", "diastolic", "heart_rate"];

/// How the five reading fields are located in a pattern's captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLayout {
    /// All of [`GROUP_NAMES`] are present as named groups.
    Named,
    /// Groups 1 to 5, in column order.
    Positional,
}

impl GroupLayout {
    /// Decide the layout of a compiled pattern.
    ///
    /// Named groups win when all five are declared; otherwise the pattern
    /// needs at least five positional groups.
    pub fn detect(re: &Regex) -> Result<GroupLayout, BpError> {
        let names: Vec<&str> = re.capture_names().flatten().collect();
        if GROUP_NAMES.iter().all(|n| names.contains(n)) {
            return Ok(GroupLayout::Named);
        }

        let groups = re.captures_len() - 1;
        if groups < GROUP_NAMES.len() {
            return Err(BpError::ConfigInvalid(format!(
                "extraction pattern has {} capture group(s), expected 5 ({})",
                groups,
                GROUP_NAMES.join(", ")
            )));
        }

        Ok(GroupLayout::Positional)
    }

    /// Pull the five field texts out of a match.
    ///
    /// Returns None when an optional group did not participate.
    pub fn fields<'h>(&self, caps: &Captures<'h>) -> Option<[&'h str; 5]> {
        let get = |i: usize| -> Option<&'h str> {
            let m = match self {
                GroupLayout::Named => caps.name(GROUP_NAMES[i]),
                GroupLayout::Positional => caps.get(i + 1),
            };
            m.map(|m| m.as_str())
        };
        Some([get(0)?, get(1)?, get(2)?, get(3)?, get(4)?])
    }
}

/// Compile an extraction pattern and work out its group layout.
pub fn compile_pattern(pattern: &str) -> Result<(Regex, GroupLayout), BpError> {
    let re = Regex::new(pattern)?;
    let layout = GroupLayout::detect(&re)?;
    Ok((re, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DEFAULT_BP_DATA_PATTERN;

    #[test]
    fn test_default_pattern_is_positional() {
        let (_, layout) = compile_pattern(DEFAULT_BP_DATA_PATTERN).unwrap();
        assert_eq!(layout, GroupLayout::Positional);
    }

    #[test]
    fn test_named_pattern() {
        let pattern = r"(?P<time>\d{2}:\d{2}) (?P<date>\S+) (?P<systolic>\d+)/(?P<diastolic>\d+) (?P<heart_rate>\d+)";
        let (re, layout) = compile_pattern(pattern).unwrap();
        assert_eq!(layout, GroupLayout::Named);

        let caps = re.captures("14:30 2025-06-25 120/80 65").unwrap();
        let fields = layout.fields(&caps).unwrap();
        assert_eq!(fields, ["2025-06-25", "14:30", "120", "80", "65"]);
    }

    #[test]
    fn test_too_few_groups_rejected() {
        let err = compile_pattern(r"(\d+)\s+(\d+)").unwrap_err();
        assert!(matches!(err, BpError::ConfigInvalid(_)));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let err = compile_pattern(r"(\d+").unwrap_err();
        assert!(matches!(err, BpError::Pattern(_)));
    }
}
