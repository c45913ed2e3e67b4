//! Property and event accessor resolution.
//!
//! Semantic-linkage records tie a property to its get/set methods and an
//! event to its add/remove methods. Resolution enforces the structural
//! invariants: a property must have a getter (setter optional, matching
//! static-ness), an event must have both add and remove (matching
//! static-ness), and no other linkage kinds are permitted.

use crate::{
    metadata::tables::{Event, MethodRc, MethodSemanticsAttributes, Property},
    Result,
};

/// The resolved accessor pair of a property.
#[derive(Debug)]
pub struct PropertyAccessors {
    /// The getter, always present
    pub get: MethodRc,
    /// The setter, if the property is writable
    pub set: Option<MethodRc>,
}

/// The resolved accessor pair of an event.
#[derive(Debug)]
pub struct EventAccessors {
    /// The subscription method
    pub add: MethodRc,
    /// The unsubscription method
    pub remove: MethodRc,
}

/// Resolve a property's semantic linkages into its accessor pair.
///
/// # Errors
/// Returns an invalid-metadata error if a linkage is neither getter nor
/// setter, if the getter is missing, or if the setter's static-ness differs
/// from the getter's.
pub fn resolve_property(property: &Property) -> Result<PropertyAccessors> {
    let mut get_method = None;
    let mut set_method = None;

    for linkage in &property.semantics {
        match linkage.semantics {
            MethodSemanticsAttributes::GETTER => get_method = Some(linkage.method.clone()),
            MethodSemanticsAttributes::SETTER => set_method = Some(linkage.method.clone()),
            _ => {
                return Err(invalid_metadata!(
                    "property '{}' supports only get and set methods",
                    property.name
                ))
            }
        }
    }

    let Some(get) = get_method else {
        return Err(invalid_metadata!(
            "property '{}' has no getter",
            property.name
        ));
    };

    if let Some(set) = &set_method {
        if set.is_static() != get.is_static() {
            return Err(invalid_metadata!(
                "accessors of property '{}' disagree on static-ness",
                property.name
            ));
        }
    }

    Ok(PropertyAccessors {
        get,
        set: set_method,
    })
}

/// Resolve an event's semantic linkages into its accessor pair.
///
/// # Errors
/// Returns an invalid-metadata error if a linkage is neither add nor remove,
/// if either accessor is missing, or if the two disagree on static-ness.
pub fn resolve_event(event: &Event) -> Result<EventAccessors> {
    let mut add_method = None;
    let mut remove_method = None;

    for linkage in &event.semantics {
        match linkage.semantics {
            MethodSemanticsAttributes::ADD_ON => add_method = Some(linkage.method.clone()),
            MethodSemanticsAttributes::REMOVE_ON => remove_method = Some(linkage.method.clone()),
            _ => {
                return Err(invalid_metadata!(
                    "event '{}' supports only add and remove methods",
                    event.name
                ))
            }
        }
    }

    let (Some(add), Some(remove)) = (add_method, remove_method) else {
        return Err(invalid_metadata!(
            "event '{}' requires both add and remove methods",
            event.name
        ));
    };

    if add.is_static() != remove.is_static() {
        return Err(invalid_metadata!(
            "accessors of event '{}' disagree on static-ness",
            event.name
        ));
    }

    Ok(EventAccessors { add, remove })
}
