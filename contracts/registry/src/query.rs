#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, Env, StdResult, Timestamp};

use crate::contract::NameTokenContract;
use crate::msg::{
    ExpiryResponse, HasRoleResponse, NameResponse, ParamsResponse, QueryMsg, RegistrarRoleResponse,
};
use crate::state::{TokenId, ADMIN, EXPIRIES, NAMES, REGISTRARS, REGISTRAR_ROLE, SUDO_PARAMS};

pub type Cw721QueryMsg = cw721_base::QueryMsg<cosmwasm_std::Empty>;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Name { name } => to_binary(&query_name(deps, &name)?),
        QueryMsg::RegistrationExpiry { token_id } => to_binary(&query_expiry(deps, token_id)?),
        QueryMsg::RegistrarRole {} => to_binary(&RegistrarRoleResponse {
            role: REGISTRAR_ROLE.to_string(),
        }),
        QueryMsg::HasRole { role, address } => to_binary(&query_has_role(deps, role, address)?),
        QueryMsg::Params {} => to_binary(&query_params(deps)?),
        QueryMsg::Admin {} => to_binary(&ADMIN.query_admin(deps)?),
        QueryMsg::OwnerOf {
            token_id,
            include_expired,
        } => NameTokenContract::default().query(
            deps,
            env,
            Cw721QueryMsg::OwnerOf {
                token_id,
                include_expired,
            },
        ),
        QueryMsg::NumTokens {} => {
            NameTokenContract::default().query(deps, env, Cw721QueryMsg::NumTokens {})
        }
        QueryMsg::AllOperators {
            owner,
            include_expired,
            start_after,
            limit,
        } => NameTokenContract::default().query(
            deps,
            env,
            Cw721QueryMsg::AllOperators {
                owner,
                include_expired,
                start_after,
                limit,
            },
        ),
    }
}

fn query_name(deps: Deps, name: &str) -> StdResult<NameResponse> {
    let token_id = NAMES.may_load(deps.storage, name.trim())?.unwrap_or(0);
    Ok(NameResponse { token_id })
}

fn query_expiry(deps: Deps, token_id: TokenId) -> StdResult<ExpiryResponse> {
    let expiry = EXPIRIES
        .may_load(deps.storage, token_id)?
        .unwrap_or_else(|| Timestamp::from_seconds(0));
    Ok(ExpiryResponse { expiry })
}

fn query_has_role(deps: Deps, role: String, address: String) -> StdResult<HasRoleResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let has_role = role == REGISTRAR_ROLE
        && REGISTRARS
            .may_load(deps.storage, &addr)?
            .unwrap_or(false);
    Ok(HasRoleResponse { has_role })
}

fn query_params(deps: Deps) -> StdResult<ParamsResponse> {
    let params = SUDO_PARAMS.load(deps.storage)?;
    Ok(ParamsResponse {
        registration_price: params.registration_price,
        registration_duration: params.registration_duration,
        transfer_extension: params.transfer_extension,
    })
}
