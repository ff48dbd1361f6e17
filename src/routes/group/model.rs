use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::AppError;
use crate::store::{Group, GroupLocation, Location, Member};

pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: Option<String>,
    // 任意数字原样存储
    pub refresh_interval: Option<Number>,
    // 单位：小时
    pub expiry_duration: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    // 非字符串按缺失处理，返回字段必填的提示
    pub member_id: Option<Value>,
    pub display_name: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub member_id: Option<Value>,
    // 先按任意 JSON 接收，区分“缺失”和“不是数字”
    pub lat: Option<Value>,
    pub lng: Option<Value>,
    pub sharing_enabled: Option<bool>,
}

#[derive(Debug, PartialEq)]
pub struct ValidJoin {
    pub member_id: String,
    pub display_name: String,
}

#[derive(Debug, PartialEq)]
pub struct ValidLocation {
    pub member_id: String,
    pub lat: f64,
    pub lng: f64,
    pub sharing_enabled: bool,
}

fn non_empty(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

impl JoinGroupRequest {
    pub fn validate(self) -> Result<ValidJoin, AppError> {
        match (non_empty(self.member_id), non_empty(self.display_name)) {
            (Some(member_id), Some(display_name)) => Ok(ValidJoin {
                member_id,
                display_name,
            }),
            _ => Err(AppError::bad_request(
                "memberId and displayName are required",
            )),
        }
    }
}

impl UpdateLocationRequest {
    pub fn validate(self) -> Result<ValidLocation, AppError> {
        let (Some(member_id), Some(lat), Some(lng)) = (non_empty(self.member_id), self.lat, self.lng)
        else {
            return Err(AppError::bad_request("memberId, lat, and lng are required"));
        };

        let (Some(lat), Some(lng)) = (lat.as_f64(), lng.as_f64()) else {
            return Err(AppError::bad_request("lat and lng must be numbers"));
        };

        if !in_range(lat, LAT_RANGE) || !in_range(lng, LNG_RANGE) {
            return Err(AppError::bad_request("Invalid coordinates"));
        }

        Ok(ValidLocation {
            member_id,
            lat,
            lng,
            sharing_enabled: self.sharing_enabled.unwrap_or(true),
        })
    }
}

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&value)
}

// ---------- 响应 ----------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    pub id: String,
    pub name: String,
    pub refresh_interval: Number,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&Group> for GroupInfo {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            refresh_interval: group.refresh_interval.clone(),
            expires_at: group.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    pub id: String,
    pub display_name: String,
    pub group_id: String,
}

impl From<Member> for MemberInfo {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            display_name: member.display_name,
            group_id: member.group_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub member_id: String,
    pub lat: f64,
    pub lng: f64,
    pub sharing_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<Location> for LocationInfo {
    fn from(location: Location) -> Self {
        Self {
            member_id: location.member_id,
            lat: location.lat,
            lng: location.lng,
            sharing_enabled: location.sharing_enabled,
            updated_at: location.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateGroupResponse {
    pub group: GroupInfo,
}

#[derive(Debug, Serialize)]
pub struct JoinGroupResponse {
    pub member: MemberInfo,
    pub group: GroupInfo,
}

#[derive(Debug, Serialize)]
pub struct UpdateLocationResponse {
    pub location: LocationInfo,
}

#[derive(Debug, Serialize)]
pub struct GroupLocationsResponse {
    pub locations: Vec<GroupLocation>,
}

#[derive(Debug, Serialize)]
pub struct DeleteGroupResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location_request(body: Value) -> UpdateLocationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_join_requires_both_fields() {
        let req = JoinGroupRequest {
            member_id: Some(json!("m1")),
            display_name: Some(json!("")),
        };
        assert_eq!(
            req.validate(),
            Err(AppError::bad_request("memberId and displayName are required"))
        );

        let req = JoinGroupRequest {
            member_id: Some(json!("m1")),
            display_name: Some(json!("Alice")),
        };
        assert_eq!(
            req.validate(),
            Ok(ValidJoin {
                member_id: "m1".into(),
                display_name: "Alice".into(),
            })
        );
    }

    #[test]
    fn test_join_non_string_fields() {
        let req: JoinGroupRequest =
            serde_json::from_value(json!({ "memberId": 123, "displayName": "Alice" })).unwrap();
        assert_eq!(
            req.validate(),
            Err(AppError::bad_request("memberId and displayName are required"))
        );

        let req: JoinGroupRequest =
            serde_json::from_value(json!({ "memberId": "m1", "displayName": ["A"] })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_group_accepts_any_numeric_interval() {
        let req: CreateGroupRequest =
            serde_json::from_value(json!({ "refreshInterval": 15.5, "expiryDuration": -1 }))
                .unwrap();
        assert_eq!(req.refresh_interval, Number::from_f64(15.5));
        assert_eq!(req.expiry_duration, Some(-1.0));
    }

    #[test]
    fn test_location_non_string_member_id() {
        let req = location_request(json!({ "memberId": 7, "lat": 1.0, "lng": 2.0 }));
        assert_eq!(
            req.validate(),
            Err(AppError::bad_request("memberId, lat, and lng are required"))
        );
    }

    #[test]
    fn test_location_missing_fields() {
        let req = location_request(json!({ "memberId": "m1", "lat": 1.0 }));
        assert_eq!(
            req.validate(),
            Err(AppError::bad_request("memberId, lat, and lng are required"))
        );
    }

    #[test]
    fn test_location_non_numeric() {
        let req = location_request(json!({ "memberId": "m1", "lat": "37.7", "lng": -122.4 }));
        assert_eq!(
            req.validate(),
            Err(AppError::bad_request("lat and lng must be numbers"))
        );
    }

    #[test]
    fn test_location_out_of_range() {
        for (lat, lng) in [(90.1, 0.0), (-90.5, 0.0), (0.0, 180.01), (0.0, -181.0)] {
            let req = location_request(json!({ "memberId": "m1", "lat": lat, "lng": lng }));
            assert_eq!(
                req.validate(),
                Err(AppError::bad_request("Invalid coordinates")),
                "({lat}, {lng}) should be rejected"
            );
        }
    }

    #[test]
    fn test_location_bounds_inclusive_and_sharing_default() {
        let req = location_request(json!({ "memberId": "m1", "lat": -90, "lng": 180 }));
        assert_eq!(
            req.validate(),
            Ok(ValidLocation {
                member_id: "m1".into(),
                lat: -90.0,
                lng: 180.0,
                sharing_enabled: true,
            })
        );
    }

    #[test]
    fn test_location_sharing_disabled() {
        let req = location_request(
            json!({ "memberId": "m1", "lat": 1.0, "lng": 2.0, "sharingEnabled": false }),
        );
        assert!(!req.validate().unwrap().sharing_enabled);
    }
}
