use serde::{Deserialize, Serialize};

use crate::contract::{BuildResponse, CoreRequest, CoreResponse, DeleteResponse};
use crate::destinations::DestinationListService;
use crate::jump_list::{JumpList, ListOptions};
use crate::platform::HostLocator;
use crate::transaction::TransactionError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    Begin,
    CategoriesFailed,
    Commit,
    Service,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

/// Runs one host request. Requests without options fall back to `defaults`.
pub fn handle_request<L: DestinationListService>(
    jump_list: &mut JumpList<L>,
    locator: &dyn HostLocator,
    defaults: &ListOptions,
    request: CoreRequest,
) -> TransportResponse {
    match request {
        CoreRequest::Build(build) => {
            let options = build.options.as_ref().unwrap_or(defaults);
            match jump_list.create_jump_list(locator, options, &build.bookmarks, &build.playlists)
            {
                Ok(report) => TransportResponse::Ok {
                    response: CoreResponse::Build(BuildResponse { report }),
                },
                Err(error) => TransportResponse::Err {
                    error: map_transaction_error(error),
                },
            }
        }
        CoreRequest::Delete => match jump_list.list_mut().delete_list() {
            Ok(()) => TransportResponse::Ok {
                response: CoreResponse::Delete(DeleteResponse { deleted: true }),
            },
            Err(error) => TransportResponse::Err {
                error: ErrorResponse {
                    code: ErrorCode::Service,
                    message: error.to_string(),
                },
            },
        },
    }
}

pub fn handle_json<L: DestinationListService>(
    jump_list: &mut JumpList<L>,
    locator: &dyn HostLocator,
    defaults: &ListOptions,
    payload: &str,
) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(jump_list, locator, defaults, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).expect("transport response should serialize")
}

fn map_transaction_error(error: TransactionError) -> ErrorResponse {
    let code = match &error {
        TransactionError::Begin(_) => ErrorCode::Begin,
        TransactionError::CategoriesFailed(_) => ErrorCode::CategoriesFailed,
        TransactionError::Commit(_) => ErrorCode::Commit,
    };
    ErrorResponse {
        code,
        message: error.to_string(),
    }
}
