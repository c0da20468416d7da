//! Shipping address book.
//!
//! Every user keeps a list of saved addresses with at most one marked as the
//! default. Orders copy the chosen address into their own snapshot, so
//! deleting a saved address never affects an existing order.

use crate::error::CommerceError;
use crate::ids::{AddressId, UserId};
use crate::store::Store;
use serde::{Deserialize, Serialize};

/// A saved shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingAddress {
    /// Unique address identifier.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    /// Recipient name.
    pub full_name: String,
    /// Phone number with country code.
    pub phone_number: String,
    /// Address line 1.
    pub address_line1: String,
    /// Address line 2 (apt, suite, ...).
    pub address_line2: Option<String>,
    /// City.
    pub city: String,
    /// State/province.
    pub state: Option<String>,
    /// Postal/ZIP code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Whether this is the user's default address. At most one per user.
    pub is_default: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

/// Input for creating or updating a shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAddress {
    pub full_name: String,
    pub phone_number: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

impl NewAddress {
    /// Validate the input fields.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let phone = self.phone_number.trim();
        if phone.is_empty() {
            return Err(CommerceError::Validation(
                "Phone number cannot be empty".to_string(),
            ));
        }
        if !phone.starts_with('+') {
            return Err(CommerceError::Validation(
                "Phone number must include country code (e.g., +1234567890)".to_string(),
            ));
        }
        if phone.len() < 10 {
            return Err(CommerceError::Validation(
                "Phone number is too short".to_string(),
            ));
        }
        if self.address_line1.trim().is_empty() {
            return Err(CommerceError::Validation(
                "Address line 1 is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Create a new shipping address for a user.
///
/// If the new address is the default, every other default owned by the same
/// user is cleared first.
pub fn create_address(
    store: &mut impl Store,
    user_id: &UserId,
    input: NewAddress,
) -> Result<ShippingAddress, CommerceError> {
    input.validate()?;

    if input.is_default {
        clear_defaults(store, user_id);
    }

    let now = current_timestamp();
    let address = ShippingAddress {
        id: AddressId::generate(),
        user_id: user_id.clone(),
        full_name: input.full_name,
        phone_number: input.phone_number,
        address_line1: input.address_line1,
        address_line2: input.address_line2,
        city: input.city,
        state: input.state,
        postal_code: input.postal_code,
        country: input.country,
        is_default: input.is_default,
        created_at: now,
        updated_at: now,
    };
    store.insert_address(address.clone());
    Ok(address)
}

/// Update an existing address, preserving the single-default invariant.
pub fn update_address(
    store: &mut impl Store,
    user_id: &UserId,
    address_id: &AddressId,
    input: NewAddress,
) -> Result<ShippingAddress, CommerceError> {
    input.validate()?;

    if store.address(user_id, address_id).is_none() {
        return Err(CommerceError::AddressNotFound(address_id.to_string()));
    }

    if input.is_default {
        // Clear every other default before flipping this one.
        for address in store.addresses_for_mut(user_id) {
            if &address.id != address_id && address.is_default {
                address.is_default = false;
                address.updated_at = current_timestamp();
            }
        }
    }

    let address = store
        .address_mut(user_id, address_id)
        .ok_or_else(|| CommerceError::AddressNotFound(address_id.to_string()))?;
    address.full_name = input.full_name;
    address.phone_number = input.phone_number;
    address.address_line1 = input.address_line1;
    address.address_line2 = input.address_line2;
    address.city = input.city;
    address.state = input.state;
    address.postal_code = input.postal_code;
    address.country = input.country;
    address.is_default = input.is_default;
    address.updated_at = current_timestamp();
    Ok(address.clone())
}

/// Mark one address as the user's default, clearing any other.
pub fn set_default_address(
    store: &mut impl Store,
    user_id: &UserId,
    address_id: &AddressId,
) -> Result<ShippingAddress, CommerceError> {
    if store.address(user_id, address_id).is_none() {
        return Err(CommerceError::AddressNotFound(address_id.to_string()));
    }

    clear_defaults(store, user_id);

    let address = store
        .address_mut(user_id, address_id)
        .ok_or_else(|| CommerceError::AddressNotFound(address_id.to_string()))?;
    address.is_default = true;
    address.updated_at = current_timestamp();
    Ok(address.clone())
}

/// Get every address a user has saved.
pub fn user_addresses<'a>(store: &'a impl Store, user_id: &UserId) -> Vec<&'a ShippingAddress> {
    store.addresses_for(user_id)
}

/// Get the user's default address, if any.
pub fn default_address<'a>(
    store: &'a impl Store,
    user_id: &UserId,
) -> Option<&'a ShippingAddress> {
    store.addresses_for(user_id).into_iter().find(|a| a.is_default)
}

/// Delete an address. Orders keep their own snapshots, so this is
/// unconditional.
pub fn delete_address(
    store: &mut impl Store,
    user_id: &UserId,
    address_id: &AddressId,
) -> Result<(), CommerceError> {
    if store.remove_address(user_id, address_id) {
        Ok(())
    } else {
        Err(CommerceError::AddressNotFound(address_id.to_string()))
    }
}

fn clear_defaults(store: &mut impl Store, user_id: &UserId) {
    for address in store.addresses_for_mut(user_id) {
        if address.is_default {
            address.is_default = false;
            address.updated_at = current_timestamp();
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn input(is_default: bool) -> NewAddress {
        NewAddress {
            full_name: "Ada Lovelace".to_string(),
            phone_number: "+14155550100".to_string(),
            address_line1: "1 Analytical Way".to_string(),
            address_line2: None,
            city: "London".to_string(),
            state: None,
            postal_code: "EC1A".to_string(),
            country: "GB".to_string(),
            is_default,
        }
    }

    #[test]
    fn test_phone_validation() {
        let mut bad = input(false);
        bad.phone_number = "4155550100".to_string();
        assert!(matches!(
            bad.validate(),
            Err(CommerceError::Validation(_))
        ));

        bad.phone_number = "+1".to_string();
        assert!(bad.validate().is_err());

        bad.phone_number = "   ".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_address_line_required() {
        let mut bad = input(false);
        bad.address_line1 = "".to_string();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_single_default_across_creates() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u1");

        let first = create_address(&mut store, &user, input(true)).unwrap();
        let second = create_address(&mut store, &user, input(true)).unwrap();

        let defaults: Vec<_> = store
            .addresses_for(&user)
            .into_iter()
            .filter(|a| a.is_default)
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, second.id);
        assert!(!store.address(&user, &first.id).unwrap().is_default);
    }

    #[test]
    fn test_set_default_switches() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u1");
        let a = create_address(&mut store, &user, input(true)).unwrap();
        let b = create_address(&mut store, &user, input(false)).unwrap();

        set_default_address(&mut store, &user, &b.id).unwrap();
        assert!(!store.address(&user, &a.id).unwrap().is_default);
        assert!(store.address(&user, &b.id).unwrap().is_default);
        assert_eq!(default_address(&store, &user).map(|x| x.id.clone()), Some(b.id));
    }

    #[test]
    fn test_update_can_claim_default() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u1");
        let a = create_address(&mut store, &user, input(true)).unwrap();
        let b = create_address(&mut store, &user, input(false)).unwrap();

        update_address(&mut store, &user, &b.id, input(true)).unwrap();
        assert!(!store.address(&user, &a.id).unwrap().is_default);
        assert!(store.address(&user, &b.id).unwrap().is_default);
    }

    #[test]
    fn test_defaults_are_per_user() {
        let mut store = MemoryStore::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        create_address(&mut store, &alice, input(true)).unwrap();
        let b = create_address(&mut store, &bob, input(true)).unwrap();

        // Bob claiming a default must not clear Alice's.
        assert!(default_address(&store, &alice).is_some());
        assert_eq!(default_address(&store, &bob).map(|x| x.id.clone()), Some(b.id));
    }

    #[test]
    fn test_owner_scoped_lookup() {
        let mut store = MemoryStore::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        let a = create_address(&mut store, &alice, input(false)).unwrap();

        // Bob sees the same error as for a missing address.
        assert!(matches!(
            set_default_address(&mut store, &bob, &a.id),
            Err(CommerceError::AddressNotFound(_))
        ));
        assert!(matches!(
            delete_address(&mut store, &bob, &a.id),
            Err(CommerceError::AddressNotFound(_))
        ));
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        let user = UserId::new("u1");
        let a = create_address(&mut store, &user, input(false)).unwrap();
        delete_address(&mut store, &user, &a.id).unwrap();
        assert!(store.address(&user, &a.id).is_none());
    }
}
