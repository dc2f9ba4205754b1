//! State of the outpost user.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// The item used to store the owner and the outpost.
pub const STATE: Item<ContractState> = Item::new("state");

/// Notes keyed by the address that saved them.
pub const NOTES: Map<&Addr, String> = Map::new("notes");

/// The state of the outpost user.
#[cw_serde]
pub struct ContractState {
    /// The account allowed to save the outpost and call it.
    pub owner: Addr,
    /// The outpost this contract forwards messages to.
    pub outpost: Option<Addr>,
}
