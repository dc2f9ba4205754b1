//! Owner and delegate checks.

use cosmwasm_std::{Addr, Empty, Order, StdResult, Storage};

use crate::{
    state::{DELEGATES, STATE},
    ContractError,
};

/// Succeeds if `caller` is the owner or a registered delegate.
/// # Errors
/// Returns [`ContractError::Unauthorized`] otherwise.
pub fn authorize(storage: &dyn Storage, caller: &Addr) -> Result<(), ContractError> {
    if is_authorized(storage, caller)? {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}

/// Succeeds only if `caller` is the owner.
/// # Errors
/// Returns [`ContractError::Unauthorized`] otherwise.
pub fn assert_owner(storage: &dyn Storage, caller: &Addr) -> Result<(), ContractError> {
    if STATE.load(storage)?.owner == *caller {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}

/// Returns true if `address` is the owner or a registered delegate.
/// # Errors
/// Returns an error if the contract state cannot be loaded.
pub fn is_authorized(storage: &dyn Storage, address: &Addr) -> StdResult<bool> {
    Ok(STATE.load(storage)?.owner == *address || DELEGATES.has(storage, address))
}

/// Registers a delegate. Registering an existing delegate is a no-op.
/// # Errors
/// Returns an error if storage fails.
pub fn add_delegate(storage: &mut dyn Storage, delegate: &Addr) -> StdResult<()> {
    DELEGATES.save(storage, delegate, &Empty {})
}

/// Removes a delegate. Removing an unknown address is a no-op.
pub fn remove_delegate(storage: &mut dyn Storage, delegate: &Addr) {
    DELEGATES.remove(storage, delegate);
}

/// Returns the registered delegates in address order.
/// # Errors
/// Returns an error if a stored key cannot be decoded.
pub fn delegates(storage: &dyn Storage) -> StdResult<Vec<Addr>> {
    DELEGATES
        .keys(storage, None, None, Order::Ascending)
        .collect()
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::testing::MockApi;

    use super::*;
    use crate::{state::ContractState, test::helpers::mk_deps};

    #[test]
    fn owner_and_delegates_are_authorized() {
        let mut deps = mk_deps();
        let api = MockApi::default();
        let owner = api.addr_make("owner");
        let delegate = api.addr_make("delegate");
        let stranger = api.addr_make("stranger");

        STATE
            .save(deps.as_mut().storage, &ContractState::new(owner.clone()))
            .unwrap();
        add_delegate(deps.as_mut().storage, &delegate).unwrap();

        authorize(deps.as_ref().storage, &owner).unwrap();
        authorize(deps.as_ref().storage, &delegate).unwrap();
        assert!(matches!(
            authorize(deps.as_ref().storage, &stranger),
            Err(ContractError::Unauthorized)
        ));

        assert_owner(deps.as_ref().storage, &owner).unwrap();
        assert!(matches!(
            assert_owner(deps.as_ref().storage, &delegate),
            Err(ContractError::Unauthorized)
        ));

        remove_delegate(deps.as_mut().storage, &delegate);
        assert!(!is_authorized(deps.as_ref().storage, &delegate).unwrap());
        assert!(delegates(deps.as_ref().storage).unwrap().is_empty());
    }
}
