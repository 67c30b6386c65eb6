//! Keeps a provider's free-text service location in sync with the
//! structured city/state fields.
//!
//! The rule is client-side formatting: the server stores whatever text it
//! receives and never validates the relationship.

/// Separator between city and state in the display string.
pub const SEPARATOR: &str = " - ";

/// The three fields the rule operates on. Empty string means unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationFields {
    pub city: String,
    pub state: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    City,
    State,
    Location,
}

/// Apply one edit and propagate it across the other fields.
///
/// Precedence:
/// 1. Editing `location` with text containing `" - "` splits it back into
///    `city` and `state` (trimmed); `location` keeps the literal input.
/// 2. Editing `city` or `state` while both end up non-empty derives
///    `location = "{city} - {state}"`, unless the current `location` holds
///    a manually entered value that already contains the separator.
/// 3. Otherwise only the edited field changes.
pub fn reconcile(current: &LocationFields, field: LocationField, value: &str) -> LocationFields {
    let mut next = current.clone();
    match field {
        LocationField::Location => {
            next.location = value.to_string();
            if let Some((city, state)) = value.split_once(SEPARATOR) {
                next.city = city.trim().to_string();
                next.state = state.trim().to_string();
            }
        }
        LocationField::City | LocationField::State => {
            if field == LocationField::City {
                next.city = value.to_string();
            } else {
                next.state = value.to_string();
            }
            let derivable = !next.city.is_empty() && !next.state.is_empty();
            let overwritable =
                current.location.is_empty() || !current.location.contains(SEPARATOR);
            if derivable && overwritable {
                next.location = format!("{}{}{}", next.city, SEPARATOR, next.state);
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(city: &str, state: &str, location: &str) -> LocationFields {
        LocationFields {
            city: city.into(),
            state: state.into(),
            location: location.into(),
        }
    }

    #[test]
    fn editing_state_derives_location() {
        let current = fields("São Paulo", "SP", "");
        let next = reconcile(&current, LocationField::State, "RJ");
        assert_eq!(next.location, "São Paulo - RJ");
        assert_eq!(next.state, "RJ");
        assert_eq!(next.city, "São Paulo");
    }

    #[test]
    fn editing_location_back_propagates() {
        let current = fields("São Paulo", "SP", "São Paulo - SP");
        let next = reconcile(&current, LocationField::Location, "Rio de Janeiro - RJ");
        assert_eq!(next.city, "Rio de Janeiro");
        assert_eq!(next.state, "RJ");
        assert_eq!(next.location, "Rio de Janeiro - RJ");
    }

    #[test]
    fn back_propagation_trims_whitespace() {
        let current = LocationFields::default();
        let next = reconcile(&current, LocationField::Location, "  Recife  -  PE ");
        // "  Recife " / " PE " around the first " - " occurrence
        assert_eq!(next.city, "Recife");
        assert_eq!(next.state, "PE");
        assert_eq!(next.location, "  Recife  -  PE ");
    }

    #[test]
    fn free_form_location_is_not_clobbered() {
        let current = fields("Curitiba", "PR", "Curitiba - PR");
        let next = reconcile(&current, LocationField::City, "Londrina");
        // current location already carries the separator: leave it alone
        assert_eq!(next.location, "Curitiba - PR");
        assert_eq!(next.city, "Londrina");
    }

    #[test]
    fn plain_text_location_is_replaced_on_structured_edit() {
        let current = fields("Salvador", "", "atendo na região metropolitana");
        let next = reconcile(&current, LocationField::State, "BA");
        assert_eq!(next.location, "Salvador - BA");
    }

    #[test]
    fn no_derivation_while_a_field_is_empty() {
        let current = LocationFields::default();
        let next = reconcile(&current, LocationField::City, "Fortaleza");
        assert_eq!(next.location, "");
        assert_eq!(next.state, "");
    }

    #[test]
    fn location_without_separator_only_stores_text() {
        let current = fields("Manaus", "AM", "Manaus - AM");
        let next = reconcile(&current, LocationField::Location, "centro de Manaus");
        assert_eq!(next.city, "Manaus");
        assert_eq!(next.state, "AM");
        assert_eq!(next.location, "centro de Manaus");
    }
}
