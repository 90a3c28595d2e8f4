#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{DepsMut, Empty, Env, Event, MessageInfo, Response, StdError};
use cw2::set_contract_version;
use cw_utils::nonpayable;
use name_registry::helpers::RegistryContract;
use semver::Version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg};
use crate::state::{Commitment, Config, COMMITMENTS, CONFIG};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:name-registrar";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let registry = deps.api.addr_validate(&msg.registry)?;
    CONFIG.save(
        deps.storage,
        &Config {
            registry: registry.clone(),
            min_commit_blocks: msg.min_commit_blocks,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("registry", registry)
        .add_attribute("min_commit_blocks", msg.min_commit_blocks.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Commit { committer } => execute_commit(deps, env, info, committer),
        ExecuteMsg::Reveal { name } => execute_reveal(deps, env, info, name),
    }
}

/// Anchor a commitment at the current block. Deliberately opaque: no name,
/// no payment, and any prior commitment for the address is overwritten.
pub fn execute_commit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    committer: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let committer = deps.api.addr_validate(&committer)?;

    COMMITMENTS.save(
        deps.storage,
        &committer,
        &Commitment {
            commit_block: env.block.height,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "commit")
        .add_event(
            Event::new("commit")
                .add_attribute("committer", committer)
                .add_attribute("commit_block", env.block.height.to_string()),
        ))
}

/// Disclose the name and forward the registration to the registry with the
/// attached payment. The commitment is consumed; a registry failure aborts
/// the whole call, so the commitment consumption rolls back with it.
pub fn execute_reveal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
) -> Result<Response, ContractError> {
    let commitment = COMMITMENTS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::Uncommitted {})?;

    let config = CONFIG.load(deps.storage)?;
    if env.block.height < commitment.commit_block + config.min_commit_blocks {
        return Err(ContractError::CommitTooRecent {
            current: env.block.height,
            committed: commitment.commit_block,
            min_blocks: config.min_commit_blocks,
        });
    }

    COMMITMENTS.remove(deps.storage, &info.sender);

    let register_msg = RegistryContract(config.registry)
        .register_name(&name, info.sender.as_str(), info.funds.clone())?;

    Ok(Response::new()
        .add_attribute("action", "reveal")
        .add_event(
            Event::new("reveal")
                .add_attribute("name", name)
                .add_attribute("committer", info.sender),
        )
        .add_message(register_msg))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: Empty) -> Result<Response, ContractError> {
    let current_version = cw2::get_contract_version(deps.storage)?;
    if current_version.contract != CONTRACT_NAME {
        return Err(StdError::generic_err("Cannot upgrade to a different contract").into());
    }
    let version: Version = current_version
        .version
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;
    let new_version: Version = CONTRACT_VERSION
        .parse()
        .map_err(|_| StdError::generic_err("Invalid contract version"))?;

    if version > new_version {
        return Err(StdError::generic_err("Cannot upgrade to a previous contract version").into());
    }
    // if same version return
    if version == new_version {
        return Ok(Response::new());
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new())
}
