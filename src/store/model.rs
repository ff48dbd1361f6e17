use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Number;

pub const DEFAULT_REFRESH_INTERVAL: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    // None 表示永不过期
    pub expires_at: Option<DateTime<Utc>>,
    // 客户端轮询间隔（秒），原样存储，服务端不校验也不强制
    pub refresh_interval: Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: String,
    pub group_id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

/// 成员的最新位置，每个成员只保留一条。
///
/// `updated_at` 只在第一次写入时设置，之后的更新只改坐标和共享开关。
/// 它表示“从何时开始共享”，而不是“最后一次上报时间”，
/// 不活跃清理依赖这一语义。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub member_id: String,
    pub group_id: String,
    pub lat: f64,
    pub lng: f64,
    pub sharing_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

// 位置列表项：位置 + 成员显示名
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLocation {
    #[serde(flatten)]
    pub location: Location,
    pub display_name: String,
}
