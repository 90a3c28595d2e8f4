#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    Addr, Binary, Deps, DepsMut, Empty, Env, Event, MessageInfo, Response, StdError, Storage,
    Timestamp,
};
use cw2::set_contract_version;
use cw721_base::state::TokenInfo;
use cw_utils::{maybe_addr, must_pay, nonpayable};
use name_common::{charge_registration_fee, send_refund, NATIVE_DENOM};
use semver::Version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, NameRef};
use crate::state::{
    SudoParams, TokenId, ADMIN, EXPIRIES, NAMES, REGISTRARS, REGISTRAR_ROLE, SUDO_PARAMS,
    TOKEN_NAMES,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:name-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The embedded cw721 base handling the generic ownership-token plumbing
pub type NameTokenContract<'a> = cw721_base::Cw721Contract<'a, Empty, Empty, Empty, Empty>;

pub type Cw721ExecuteMsg = cw721_base::ExecuteMsg<Empty, Empty>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.registration_duration == 0 || msg.transfer_extension == 0 {
        return Err(ContractError::InvalidDuration {});
    }

    SUDO_PARAMS.save(
        deps.storage,
        &SudoParams {
            registration_price: msg.registration_price,
            registration_duration: msg.registration_duration,
            transfer_extension: msg.transfer_extension,
        },
    )?;

    let api = deps.api;
    let admin = maybe_addr(api, msg.admin)?.unwrap_or_else(|| info.sender.clone());
    ADMIN.set(deps.branch(), Some(admin))?;

    // the registry itself is the minter, registrations never go through
    // the base mint path
    NameTokenContract::default().instantiate(
        deps.branch(),
        env.clone(),
        info,
        cw721_base::InstantiateMsg {
            name: "Name Tokens".to_string(),
            symbol: "NAME".to_string(),
            minter: env.contract.address.to_string(),
        },
    )?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("registry_addr", env.contract.address.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let api = deps.api;

    match msg {
        ExecuteMsg::RegisterName { name, owner } => {
            execute_register_name(deps, env, info, name, api.addr_validate(&owner)?)
        }
        ExecuteMsg::RenewName { token_id } => execute_renew_name(deps, env, info, token_id),
        ExecuteMsg::ReleaseName { handle } => execute_release_name(deps, env, info, handle),
        ExecuteMsg::GrantRole { role, address } => {
            execute_grant_role(deps, info, role, api.addr_validate(&address)?)
        }
        ExecuteMsg::RevokeRole { role, address } => {
            execute_revoke_role(deps, info, role, api.addr_validate(&address)?)
        }
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_name(deps, env, info, recipient, token_id),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_send_name(deps, env, info, contract, token_id, msg),
        ExecuteMsg::Burn { token_id } => {
            let token_id = parse_token_id(&token_id)?;
            execute_release_name(deps, env, info, NameRef::TokenId(token_id))
        }
        ExecuteMsg::Approve {
            spender,
            token_id,
            expires,
        } => NameTokenContract::default()
            .execute(
                deps,
                env,
                info,
                Cw721ExecuteMsg::Approve {
                    spender,
                    token_id,
                    expires,
                },
            )
            .map_err(|e| e.into()),
        ExecuteMsg::Revoke { spender, token_id } => NameTokenContract::default()
            .execute(deps, env, info, Cw721ExecuteMsg::Revoke { spender, token_id })
            .map_err(|e| e.into()),
        ExecuteMsg::ApproveAll { operator, expires } => NameTokenContract::default()
            .execute(
                deps,
                env,
                info,
                Cw721ExecuteMsg::ApproveAll { operator, expires },
            )
            .map_err(|e| e.into()),
        ExecuteMsg::RevokeAll { operator } => NameTokenContract::default()
            .execute(deps, env, info, Cw721ExecuteMsg::RevokeAll { operator })
            .map_err(|e| e.into()),
    }
}

/// Mint a fresh name token, or silently reclaim one whose registration has
/// lapsed. Registrar role only.
pub fn execute_register_name(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    owner: Addr,
) -> Result<Response, ContractError> {
    let name = name.trim().to_string();

    if !REGISTRARS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(false)
    {
        return Err(ContractError::NotAuthorizedRole {});
    }

    let params = SUDO_PARAMS.load(deps.storage)?;
    let payment = must_pay(&info, NATIVE_DENOM)?;
    if payment < params.registration_price {
        return Err(ContractError::InsufficientPayment {
            got: payment.u128(),
            expected: params.registration_price.u128(),
        });
    }

    let contract = NameTokenContract::default();
    let expiry = env.block.time.plus_seconds(params.registration_duration);

    let event = match NAMES.may_load(deps.storage, &name)? {
        Some(token_id) => {
            let key = token_id.to_string();
            let current = EXPIRIES.load(deps.storage, token_id)?;
            if env.block.time < current {
                return Err(ContractError::NameAlreadyRegistered { name });
            }
            // silent reclaim: same token id, new owner, approvals wiped
            let mut token = contract.tokens.load(deps.storage, &key)?;
            let previous_owner = token.owner;
            token.owner = owner.clone();
            token.approvals = vec![];
            contract.tokens.save(deps.storage, &key, &token)?;
            EXPIRIES.save(deps.storage, token_id, &expiry)?;

            Event::new("reclaim-name")
                .add_attribute("name", &name)
                .add_attribute("token_id", key)
                .add_attribute("previous_owner", previous_owner)
                .add_attribute("owner", &owner)
                .add_attribute("expiry", expiry.seconds().to_string())
        }
        None => {
            let token_id = contract.increment_tokens(deps.storage)?;
            let key = token_id.to_string();
            contract.tokens.update(deps.storage, &key, |old| match old {
                Some(_) => Err(ContractError::Base(cw721_base::ContractError::Claimed {})),
                None => Ok(TokenInfo {
                    owner: owner.clone(),
                    approvals: vec![],
                    token_uri: None,
                    extension: Empty {},
                }),
            })?;
            NAMES.save(deps.storage, &name, &token_id)?;
            TOKEN_NAMES.save(deps.storage, token_id, &name)?;
            EXPIRIES.save(deps.storage, token_id, &expiry)?;

            Event::new("mint-name")
                .add_attribute("name", &name)
                .add_attribute("token_id", key)
                .add_attribute("owner", &owner)
                .add_attribute("expiry", expiry.seconds().to_string())
        }
    };

    let res = Response::new()
        .add_attribute("action", "register_name")
        .add_attribute("name", name)
        .add_event(event);
    Ok(charge_registration_fee(res, payment))
}

/// Extend a registration forward from max(now, expiry). Renewal is free.
pub fn execute_renew_name(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: TokenId,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    only_owner_or_operator(deps.as_ref(), &env, &info.sender, token_id)?;

    let params = SUDO_PARAMS.load(deps.storage)?;
    let expiry = extend_expiry(deps.storage, &env, token_id, params.registration_duration)?;

    Ok(Response::new()
        .add_attribute("action", "renew_name")
        .add_event(
            Event::new("renew-name")
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("expiry", expiry.seconds().to_string()),
        ))
}

/// Burn the token, clear the name record, and refund the registration fee
/// from the vault to the token owner. State is torn down before the bank
/// send is queued.
pub fn execute_release_name(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    handle: NameRef,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let (token_id, name) = resolve_handle(deps.as_ref(), handle)?;
    let token = only_owner_or_operator(deps.as_ref(), &env, &info.sender, token_id)?;

    let contract = NameTokenContract::default();
    let key = token_id.to_string();
    contract.tokens.remove(deps.storage, &key)?;
    contract.decrement_tokens(deps.storage)?;
    NAMES.remove(deps.storage, &name);
    TOKEN_NAMES.remove(deps.storage, token_id);
    EXPIRIES.remove(deps.storage, token_id);

    let params = SUDO_PARAMS.load(deps.storage)?;
    let refund = send_refund(token.owner.clone(), params.registration_price);

    Ok(Response::new()
        .add_attribute("action", "release_name")
        .add_event(
            Event::new("burn-name")
                .add_attribute("name", name)
                .add_attribute("token_id", key)
                .add_attribute("owner", token.owner),
        )
        .add_message(refund))
}

pub fn execute_grant_role(
    deps: DepsMut,
    info: MessageInfo,
    role: String,
    address: Addr,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    if role != REGISTRAR_ROLE {
        return Err(ContractError::UnknownRole { role });
    }
    REGISTRARS.save(deps.storage, &address, &true)?;

    Ok(Response::new()
        .add_attribute("action", "grant_role")
        .add_attribute("role", role)
        .add_attribute("address", address))
}

pub fn execute_revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    role: String,
    address: Addr,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    ADMIN.assert_admin(deps.as_ref(), &info.sender)?;
    if role != REGISTRAR_ROLE {
        return Err(ContractError::UnknownRole { role });
    }
    REGISTRARS.remove(deps.storage, &address);

    Ok(Response::new()
        .add_attribute("action", "revoke_role")
        .add_attribute("role", role)
        .add_attribute("address", address))
}

/// Transfers extend the token's expiry before the cw721 base enforces the
/// usual approval semantics. A failed base transfer aborts the extension
/// with the rest of the call.
pub fn execute_transfer_name(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    token_id: String,
) -> Result<Response, ContractError> {
    let id = parse_token_id(&token_id)?;
    let params = SUDO_PARAMS.load(deps.storage)?;
    let expiry = extend_expiry(deps.storage, &env, id, params.transfer_extension)?;

    let res = NameTokenContract::default().execute(
        deps,
        env,
        info,
        Cw721ExecuteMsg::TransferNft {
            recipient,
            token_id,
        },
    )?;

    Ok(res.add_event(
        Event::new("transfer-name")
            .add_attribute("token_id", id.to_string())
            .add_attribute("expiry", expiry.seconds().to_string()),
    ))
}

pub fn execute_send_name(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    contract: String,
    token_id: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    let id = parse_token_id(&token_id)?;
    let params = SUDO_PARAMS.load(deps.storage)?;
    let expiry = extend_expiry(deps.storage, &env, id, params.transfer_extension)?;

    let res = NameTokenContract::default().execute(
        deps,
        env,
        info,
        Cw721ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        },
    )?;

    Ok(res.add_event(
        Event::new("transfer-name")
            .add_attribute("token_id", id.to_string())
            .add_attribute("expiry", expiry.seconds().to_string()),
    ))
}

/// Push a token's expiry to max(now, expiry) + seconds. Expiries only ever
/// move forward.
fn extend_expiry(
    storage: &mut dyn Storage,
    env: &Env,
    token_id: TokenId,
    seconds: u64,
) -> Result<Timestamp, ContractError> {
    let current = EXPIRIES
        .may_load(storage, token_id)?
        .ok_or(ContractError::NameNotFound {})?;
    let base = if current > env.block.time {
        current
    } else {
        env.block.time
    };
    let expiry = base.plus_seconds(seconds);
    EXPIRIES.save(storage, token_id, &expiry)?;
    Ok(expiry)
}

fn resolve_handle(deps: Deps, handle: NameRef) -> Result<(TokenId, String), ContractError> {
    match handle {
        NameRef::Name(name) => {
            let name = name.trim().to_string();
            let token_id = NAMES
                .may_load(deps.storage, &name)?
                .ok_or(ContractError::NameNotFound {})?;
            Ok((token_id, name))
        }
        NameRef::TokenId(token_id) => {
            let name = TOKEN_NAMES
                .may_load(deps.storage, token_id)?
                .ok_or(ContractError::NameNotFound {})?;
            Ok((token_id, name))
        }
    }
}

/// Checks to enforce only the token owner or an approved operator can call
fn only_owner_or_operator(
    deps: Deps,
    env: &Env,
    sender: &Addr,
    token_id: TokenId,
) -> Result<TokenInfo<Empty>, ContractError> {
    let contract = NameTokenContract::default();
    let token = contract
        .tokens
        .may_load(deps.storage, &token_id.to_string())?
        .ok_or(ContractError::NameNotFound {})?;

    if token.owner == *sender {
        return Ok(token);
    }
    if token
        .approvals
        .iter()
        .any(|a| a.spender == *sender && !a.is_expired(&env.block))
    {
        return Ok(token);
    }
    match contract
        .operators
        .may_load(deps.storage, (&token.owner, sender))?
    {
        Some(grant) if !grant.is_expired(&env.block) => Ok(token),
        _ => Err(ContractError::NotOwnerOrOperator {}),
    }
}

fn parse_token_id(token_id: &str) -> Result<TokenId, ContractError> {
    token_id
        .parse::<TokenId>()
        .map_err(|_| ContractError::NameNotFound {})
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
