//! Model-year resolution
//!
//! The 10th character walks a 30-symbol cycle, so each symbol names two
//! candidate years 30 years apart. Position 7 picks one: numeric means the
//! 1980-2009 cycle, alphabetic means 2010-2039. Nothing here reads the clock.

use crate::constants::model_year::{CURRENT_CYCLE_START, CYCLE, CYCLE_YEARS, LEGACY_CYCLE_START};

/// Which 30-year cycle a VIN belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearCycle {
    /// 1980-2009
    Legacy,
    /// 2010-2039
    Current,
}

impl YearCycle {
    /// Cycle selected by the character at position 7
    pub fn from_selector(c: char) -> Self {
        if c.is_ascii_digit() {
            YearCycle::Legacy
        } else {
            YearCycle::Current
        }
    }

    pub fn start_year(&self) -> u16 {
        match self {
            YearCycle::Legacy => LEGACY_CYCLE_START,
            YearCycle::Current => CURRENT_CYCLE_START,
        }
    }

    /// Last year of the cycle, inclusive
    pub fn end_year(&self) -> u16 {
        self.start_year() + CYCLE_YEARS - 1
    }
}

/// Whether `c` is one of the 30 model-year symbols
pub fn is_model_year_code(c: char) -> bool {
    cycle_offset(c).is_some()
}

/// Offset of a model-year symbol within its cycle
pub fn cycle_offset(c: char) -> Option<u16> {
    CYCLE.iter().position(|&s| s == c).map(|p| p as u16)
}

/// Resolve a model-year symbol against the position-7 selector
pub fn resolve_model_year(code: char, selector: char) -> Option<u16> {
    let offset = cycle_offset(code)?;
    Some(YearCycle::from_selector(selector).start_year() + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_has_thirty_distinct_symbols() {
        let mut seen: Vec<char> = CYCLE.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), CYCLE_YEARS as usize);
        assert_eq!(YearCycle::Legacy.end_year(), 2009);
        assert_eq!(YearCycle::Current.end_year(), 2039);
        for excluded in ['I', 'O', 'Q', 'U', 'Z', '0'] {
            assert!(!is_model_year_code(excluded));
        }
    }

    #[test]
    fn test_legacy_cycle() {
        assert_eq!(resolve_model_year('A', '1'), Some(1980));
        assert_eq!(resolve_model_year('M', '1'), Some(1991));
        assert_eq!(resolve_model_year('Y', '5'), Some(2000));
        assert_eq!(resolve_model_year('1', '0'), Some(2001));
        assert_eq!(resolve_model_year('9', '9'), Some(2009));
    }

    #[test]
    fn test_current_cycle() {
        assert_eq!(resolve_model_year('A', 'J'), Some(2010));
        assert_eq!(resolve_model_year('M', 'A'), Some(2021));
        assert_eq!(resolve_model_year('Y', 'Z'), Some(2030));
        assert_eq!(resolve_model_year('9', 'C'), Some(2039));
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(resolve_model_year('U', 'A'), None);
    }
}
