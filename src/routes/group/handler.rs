use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppState;
use crate::error::AppError;
use crate::utils::{ApiResponse, parse_json_body, success_to_api_response};

use super::model::{
    CreateGroupRequest, CreateGroupResponse, DeleteGroupResponse, GroupInfo,
    GroupLocationsResponse, JoinGroupRequest, JoinGroupResponse, UpdateLocationRequest,
    UpdateLocationResponse,
};

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

#[axum::debug_handler]
pub async fn create_group(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<CreateGroupResponse> {
    let req: CreateGroupRequest = parse_json_body(&body)?;

    let group = state
        .store
        .lock()
        .await
        .create_group(req.name, req.refresh_interval, req.expiry_duration);

    Ok((
        StatusCode::CREATED,
        success_to_api_response(CreateGroupResponse {
            group: GroupInfo::from(&group),
        }),
    ))
}

#[axum::debug_handler]
pub async fn join_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    body: Bytes,
) -> ApiResult<JoinGroupResponse> {
    let req = parse_json_body::<JoinGroupRequest>(&body)?.validate()?;

    let mut store = state.store.lock().await;
    if !store.group_exists(&group_id) {
        return Err(AppError::not_found(
            "Group not found. Please check the group ID and try again.",
        ));
    }

    let member = store
        .add_member(&group_id, &req.member_id, &req.display_name)
        .ok_or(AppError::InternalServerError)?;
    let group = store
        .get_group(&group_id)
        .map(GroupInfo::from)
        .ok_or(AppError::InternalServerError)?;

    Ok((
        StatusCode::OK,
        success_to_api_response(JoinGroupResponse {
            member: member.into(),
            group,
        }),
    ))
}

#[axum::debug_handler]
pub async fn update_location(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    body: Bytes,
) -> ApiResult<UpdateLocationResponse> {
    let req = parse_json_body::<UpdateLocationRequest>(&body)?.validate()?;

    let location = state
        .store
        .lock()
        .await
        .update_location(&req.member_id, &group_id, req.lat, req.lng, req.sharing_enabled)
        .ok_or_else(|| AppError::not_found("Member not found in this group"))?;

    Ok((
        StatusCode::OK,
        success_to_api_response(UpdateLocationResponse {
            location: location.into(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn get_locations(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<GroupLocationsResponse> {
    let store = state.store.lock().await;
    if !store.group_exists(&group_id) {
        return Err(AppError::not_found("Group not found"));
    }

    let locations = store.get_group_locations(&group_id);
    Ok((
        StatusCode::OK,
        success_to_api_response(GroupLocationsResponse { locations }),
    ))
}

#[axum::debug_handler]
pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> ApiResult<DeleteGroupResponse> {
    let mut store = state.store.lock().await;
    if !store.group_exists(&group_id) {
        return Err(AppError::not_found("Group not found"));
    }

    if !store.delete_group(&group_id) {
        tracing::error!("Group {} vanished while being deleted", group_id);
        return Err(AppError::InternalServerError);
    }

    Ok((
        StatusCode::OK,
        success_to_api_response(DeleteGroupResponse {
            message: "Group deleted successfully",
        }),
    ))
}
