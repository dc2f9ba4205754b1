//! This module contains the `CosmWasm` entrypoints of the outpost user.

#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response};

use crate::{
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg},
    state::{ContractState, STATE},
    ContractError,
};

const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The instantiate entry point. The sender becomes the owner.
/// # Errors
/// Will return an error if the outpost address is invalid.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    cw2::set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let outpost = msg
        .outpost
        .map(|address| deps.api.addr_validate(&address))
        .transpose()?;
    STATE.save(
        deps.storage,
        &ContractState {
            owner: info.sender.clone(),
            outpost,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", info.sender))
}

/// The execute entry point.
/// # Errors
/// Will return an error if the handler returns an error.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SaveOutpost { address } => execute::save_outpost(deps, info, &address),
        ExecuteMsg::CallOutpost { msg } => execute::call_outpost(deps, info, msg),
        ExecuteMsg::SaveNote { note } => execute::save_note(deps, info, note),
    }
}

/// The query entry point.
/// # Errors
/// Will return an error if the handler returns an error.
#[cfg_attr(not(feature = "library"), entry_point)]
#[allow(clippy::needless_pass_by_value)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::GetContractState {} => Ok(to_json_binary(&STATE.load(deps.storage)?)?),
        QueryMsg::GetNote { address } => query::note(deps, &address),
        QueryMsg::OutpostState {} => query::outpost_state(deps),
    }
}

mod execute {
    use cosmwasm_std::{DepsMut, MessageInfo, Response};
    use cw_storage_outpost::{helpers::OutpostContract, msg::ExecuteMsg as OutpostExecuteMsg};

    use crate::{
        state::{NOTES, STATE},
        ContractError,
    };

    pub fn save_outpost(
        deps: DepsMut,
        info: MessageInfo,
        address: &str,
    ) -> Result<Response, ContractError> {
        let mut state = STATE.load(deps.storage)?;
        if info.sender != state.owner {
            return Err(ContractError::Unauthorized);
        }

        let outpost = deps.api.addr_validate(address)?;
        state.outpost = Some(outpost.clone());
        STATE.save(deps.storage, &state)?;

        Ok(Response::new()
            .add_attribute("action", "save_outpost")
            .add_attribute("outpost", outpost))
    }

    pub fn call_outpost(
        deps: DepsMut,
        info: MessageInfo,
        msg: OutpostExecuteMsg,
    ) -> Result<Response, ContractError> {
        let state = STATE.load(deps.storage)?;
        if info.sender != state.owner {
            return Err(ContractError::Unauthorized);
        }
        let outpost = state.outpost.ok_or(ContractError::OutpostNotSet)?;

        let outpost = OutpostContract::new(outpost);
        Ok(Response::new()
            .add_message(outpost.call(msg)?)
            .add_attribute("action", "call_outpost")
            .add_attribute("outpost", outpost.addr()))
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn save_note(
        deps: DepsMut,
        info: MessageInfo,
        note: String,
    ) -> Result<Response, ContractError> {
        NOTES.save(deps.storage, &info.sender, &note)?;

        Ok(Response::new()
            .add_attribute("action", "save_note")
            .add_attribute("sender", info.sender))
    }
}

mod query {
    use cosmwasm_std::{to_json_binary, Binary, Deps};
    use cw_storage_outpost::helpers::OutpostContract;

    use crate::{
        state::{NOTES, STATE},
        ContractError,
    };

    pub fn note(deps: Deps, address: &str) -> Result<Binary, ContractError> {
        let address = deps.api.addr_validate(address)?;
        Ok(to_json_binary(&NOTES.may_load(deps.storage, &address)?)?)
    }

    pub fn outpost_state(deps: Deps) -> Result<Binary, ContractError> {
        let outpost = STATE
            .load(deps.storage)?
            .outpost
            .ok_or(ContractError::OutpostNotSet)?;
        let state = OutpostContract::new(outpost).query_state(deps.querier)?;
        Ok(to_json_binary(&state)?)
    }
}

#[cfg(test)]
mod tests {
    use cosmwasm_std::{
        from_json,
        testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage},
        to_json_binary, Addr, AnyMsg, Binary, ContractResult, CosmosMsg, Empty, OwnedDeps,
        SystemResult, WasmMsg, WasmQuery,
    };
    use cw_storage_outpost::{
        msg::{
            ContractStateResponse, ExecuteMsg as OutpostExecuteMsg,
            InstantiateMsg as OutpostInstantiateMsg,
        },
        state::ChannelState,
        ContractError as OutpostError,
    };

    use super::*;
    use crate::state::ContractState;

    type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier, Empty>;

    fn setup(outpost: Option<&Addr>) -> (MockDeps, Addr) {
        let mut deps = mock_dependencies();
        let owner = deps.api.addr_make("owner");
        instantiate(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            InstantiateMsg {
                outpost: outpost.map(ToString::to_string),
            },
        )
        .unwrap();
        (deps, owner)
    }

    fn post_file() -> OutpostExecuteMsg {
        OutpostExecuteMsg::SendCosmosMsgs {
            messages: vec![CosmosMsg::Any(AnyMsg {
                type_url: "/canine_chain.storage.MsgPostFile".to_string(),
                value: Binary::from(b"merkle".to_vec()),
            })],
            packet_memo: None,
            timeout_seconds: None,
        }
    }

    #[test]
    fn owner_saves_the_outpost() {
        let (mut deps, owner) = setup(None);
        let outpost = deps.api.addr_make("outpost");
        let stranger = deps.api.addr_make("stranger");

        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&stranger, &[]),
            ExecuteMsg::SaveOutpost {
                address: outpost.to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized));

        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::SaveOutpost {
                address: outpost.to_string(),
            },
        )
        .unwrap();

        let state: ContractState = from_json(
            query(deps.as_ref(), mock_env(), QueryMsg::GetContractState {}).unwrap(),
        )
        .unwrap();
        assert_eq!(state.owner, owner);
        assert_eq!(state.outpost, Some(outpost));
    }

    #[test]
    fn call_outpost_requires_an_outpost() {
        let (mut deps, owner) = setup(None);

        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CallOutpost { msg: post_file() },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::OutpostNotSet));
    }

    #[test]
    fn call_outpost_forwards_the_message() {
        let outpost = MockApi::default().addr_make("outpost");
        let (mut deps, owner) = setup(Some(&outpost));

        let res = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CallOutpost { msg: post_file() },
        )
        .unwrap();

        let CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) = &res.messages[0].msg
        else {
            panic!("expected a wasm execute");
        };
        assert_eq!(contract_addr, outpost.as_str());
        assert_eq!(from_json::<OutpostExecuteMsg>(msg).unwrap(), post_file());

        let stranger = deps.api.addr_make("stranger");
        let err = execute(
            deps.as_mut(),
            mock_env(),
            message_info(&stranger, &[]),
            ExecuteMsg::CallOutpost { msg: post_file() },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::Unauthorized));
    }

    #[test]
    fn notes_are_keyed_by_sender() {
        let (mut deps, _) = setup(None);
        let alice = deps.api.addr_make("alice");
        let bob = deps.api.addr_make("bob");

        execute(
            deps.as_mut(),
            mock_env(),
            message_info(&alice, &[]),
            ExecuteMsg::SaveNote {
                note: "file uploaded".to_string(),
            },
        )
        .unwrap();

        let note: Option<String> = from_json(
            query(
                deps.as_ref(),
                mock_env(),
                QueryMsg::GetNote {
                    address: alice.to_string(),
                },
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(note.as_deref(), Some("file uploaded"));

        let note: Option<String> = from_json(
            query(
                deps.as_ref(),
                mock_env(),
                QueryMsg::GetNote {
                    address: bob.to_string(),
                },
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(note, None);
    }

    #[test]
    fn outpost_state_is_proxied() {
        let outpost = MockApi::default().addr_make("outpost");
        let (mut deps, owner) = setup(Some(&outpost));

        let outpost_state = ContractStateResponse {
            owner,
            channel_state: ChannelState::Open,
            port_id: format!("wasm.{outpost}"),
            channel_id: "channel-0".to_string(),
            ica_address: Some("jkl1ica".to_string()),
            pending_batches: 2,
        };
        let response = to_json_binary(&outpost_state).unwrap();
        let expected_addr = outpost.to_string();
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { contract_addr, .. } if *contract_addr == expected_addr => {
                SystemResult::Ok(ContractResult::Ok(response.clone()))
            }
            _ => SystemResult::Ok(ContractResult::Err("unknown contract".to_string())),
        });

        let state: ContractStateResponse =
            from_json(query(deps.as_ref(), mock_env(), QueryMsg::OutpostState {}).unwrap())
                .unwrap();
        assert_eq!(state, outpost_state);
    }

    #[test]
    fn outpost_accepts_the_user_as_delegate() {
        // the outpost user contract, as seen by the outpost
        let user_contract = mock_env().contract.address;
        let outpost = MockApi::default().addr_make("outpost");
        let (mut user_deps, owner) = setup(Some(&outpost));

        let res = execute(
            user_deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            ExecuteMsg::CallOutpost { msg: post_file() },
        )
        .unwrap();
        let CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr, msg, ..
        }) = &res.messages[0].msg
        else {
            panic!("expected a wasm execute");
        };
        assert_eq!(contract_addr, outpost.as_str());
        let forwarded: OutpostExecuteMsg = from_json(msg).unwrap();

        let mut outpost_deps = mock_dependencies();
        cw_storage_outpost::contract::instantiate(
            outpost_deps.as_mut(),
            mock_env(),
            message_info(&owner, &[]),
            OutpostInstantiateMsg {
                owner: None,
                delegates: Some(vec![user_contract.to_string()]),
                channel_open_init_options: None,
            },
        )
        .unwrap();

        // authorized, but the outpost has no interchain account yet
        let err = cw_storage_outpost::contract::execute(
            outpost_deps.as_mut(),
            mock_env(),
            message_info(&user_contract, &[]),
            forwarded.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, OutpostError::ChannelNotReady));

        let stranger = outpost_deps.api.addr_make("stranger");
        let err = cw_storage_outpost::contract::execute(
            outpost_deps.as_mut(),
            mock_env(),
            message_info(&stranger, &[]),
            forwarded,
        )
        .unwrap_err();
        assert!(matches!(err, OutpostError::Unauthorized));
    }
}
