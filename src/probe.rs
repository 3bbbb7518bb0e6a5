//! Cheap detection probe. Tests the same trigger statics the pipeline uses,
//! without mutating a buffer or building a record, so a caller can skip the
//! full parse on plainly unstructured text.

use crate::patterns;

pub(crate) fn any_trigger(text: &str) -> bool {
    if patterns::DESC_SPLIT.is_match(text)
        || patterns::EFFORT_HOURS.is_match(text)
        || patterns::EFFORT_MINUTES.is_match(text)
        || patterns::EFFORT_PREFIX.is_match(text)
        || patterns::TAG_QUOTED.is_match(text)
        || patterns::TAG_BARE.is_match(text)
        || patterns::FOLDER_QUOTED.is_match(text)
        || patterns::FOLDER_BARE.is_match(text)
    {
        return true;
    }

    patterns::REMINDER_TABLE.iter().any(|(re, _)| re.is_match(text))
        || patterns::ADVANCED_RECUR_TABLE.iter().any(|(re, _)| re.is_match(text))
        || patterns::SIMPLE_RECUR_TABLE.iter().any(|(re, _)| re.is_match(text))
        || patterns::RELATIVE_TABLE.iter().any(|(re, _)| re.is_match(text))
        || patterns::DATE_TABLE.iter().any(|(re, _)| re.is_match(text))
        || patterns::TIME_TABLE.iter().any(|(re, _)| re.is_match(text))
        || patterns::PRIORITY_TABLE.iter().any(|(re, _)| re.is_match(text))
        || patterns::LOCATION_TABLE.iter().any(|(re, _)| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_lines_are_detected() {
        assert!(any_trigger("call mom tomorrow"));
        assert!(any_trigger("sync every monday"));
        assert!(any_trigger("standup at 9:30am"));
        assert!(any_trigger("buy milk #errands"));
        assert!(any_trigger("file it @Home"));
        assert!(any_trigger("read ~2h"));
        assert!(any_trigger("ship it asap"));
        assert!(any_trigger("notes // see wiki"));
    }

    #[test]
    fn plain_lines_are_not() {
        assert!(!any_trigger("water the plants"));
        assert!(!any_trigger("think about the roadmap"));
    }
}
