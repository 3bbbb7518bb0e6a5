//! Priority and location extractors. These are the loosest matchers in the
//! grammar and run last so they only see text no other stage claimed.

use crate::patterns::{self, LocationRule};
use crate::types::Priority;

/// First matching marker in table order wins. There is no scoring across
/// simultaneous cues.
pub(crate) fn extract_priority(buffer: &str) -> Option<(Priority, String)> {
    for (re, priority) in patterns::PRIORITY_TABLE.iter() {
        if let Some(m) = re.find(buffer) {
            return Some((*priority, m.as_str().to_string()));
        }
    }
    None
}

/// Known venue noun after "at", or a capitalized phrase after "at". The
/// capitalized branch can claim ordinary capitalized words.
pub(crate) fn extract_location(buffer: &str) -> Option<(String, String)> {
    for (re, rule) in patterns::LOCATION_TABLE.iter() {
        let Some(caps) = re.captures(buffer) else {
            continue;
        };
        let value = match rule {
            LocationRule::Venue => caps.get(1)?.as_str().to_lowercase(),
            LocationRule::ProperNoun => caps.get(1)?.as_str().to_string(),
        };
        let matched = caps.get(0).map(|m| m.as_str().to_string())?;
        return Some((value, matched));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclamation_density() {
        assert_eq!(extract_priority("ship it !!!").unwrap().0, Priority::High);
        assert_eq!(extract_priority("ship it !!").unwrap().0, Priority::Medium);
        assert!(extract_priority("ship it !").is_none());
    }

    #[test]
    fn shorthand_codes() {
        assert_eq!(extract_priority("fix p1").unwrap().0, Priority::High);
        assert_eq!(extract_priority("fix p3").unwrap().0, Priority::Low);
        assert_eq!(extract_priority("fix !high").unwrap().0, Priority::High);
        assert_eq!(extract_priority("fix !med").unwrap().0, Priority::Medium);
        assert_eq!(extract_priority("fix **").unwrap().0, Priority::High);
        assert_eq!(extract_priority("fix *").unwrap().0, Priority::Medium);
    }

    #[test]
    fn priority_words() {
        assert_eq!(extract_priority("finish deck asap").unwrap().0, Priority::High);
        assert_eq!(extract_priority("urgent call").unwrap().0, Priority::High);
        assert_eq!(
            extract_priority("cleanup low priority").unwrap().0,
            Priority::Low
        );
    }

    #[test]
    fn known_venues() {
        let (loc, matched) = extract_location("workout at the gym").unwrap();
        assert_eq!(loc, "gym");
        assert_eq!(matched, "at the gym");

        let (loc, _) = extract_location("drop off at school").unwrap();
        assert_eq!(loc, "school");
    }

    #[test]
    fn capitalized_phrases_after_at() {
        let (loc, matched) = extract_location("coffee at Blue Bottle").unwrap();
        assert_eq!(loc, "Blue Bottle");
        assert_eq!(matched, "at Blue Bottle");
    }

    #[test]
    fn lowercase_unknown_words_are_not_locations() {
        assert!(extract_location("stare at clouds").is_none());
    }
}
