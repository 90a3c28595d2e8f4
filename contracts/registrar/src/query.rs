#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, Env, StdResult};

use crate::msg::{CommitBlockResponse, CommittedResponse, ConfigResponse, QueryMsg};
use crate::state::{COMMITMENTS, CONFIG};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Committed { address } => to_binary(&query_committed(deps, address)?),
        QueryMsg::CommitBlock { address } => to_binary(&query_commit_block(deps, address)?),
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
    }
}

fn query_committed(deps: Deps, address: String) -> StdResult<CommittedResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let committed = COMMITMENTS.may_load(deps.storage, &addr)?.is_some();
    Ok(CommittedResponse { committed })
}

fn query_commit_block(deps: Deps, address: String) -> StdResult<CommitBlockResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let height = COMMITMENTS
        .may_load(deps.storage, &addr)?
        .map(|c| c.commit_block)
        .unwrap_or(0);
    Ok(CommitBlockResponse { height })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        registry: config.registry,
        min_commit_blocks: config.min_commit_blocks,
    })
}
