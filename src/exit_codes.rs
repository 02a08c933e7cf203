//! Exit codes, following Ruff's convention.

/// No offenses found
pub const SUCCESS: i32 = 0;

/// RuboCop reported at least one offense in a template
pub const OFFENSES_FOUND: i32 = 1;

/// Configuration error, unreadable file, extraction or RuboCop failure
pub const TOOL_ERROR: i32 = 2;

/// Exit code for a finished run. Tool errors win over offenses.
pub fn for_run(offenses_found: bool, tool_error: bool) -> i32 {
    if tool_error {
        TOOL_ERROR
    } else if offenses_found {
        OFFENSES_FOUND
    } else {
        SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_run() {
        assert_eq!(for_run(false, false), SUCCESS);
        assert_eq!(for_run(true, false), OFFENSES_FOUND);
        assert_eq!(for_run(true, true), TOOL_ERROR);
        assert_eq!(for_run(false, true), TOOL_ERROR);
    }
}
