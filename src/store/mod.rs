mod id;
mod model;


use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::{Clock, DefaultClock};
use serde_json::Number;
use tokio::sync::Mutex;

pub use id::{GROUP_ID_ALPHABET, GROUP_ID_LEN, generate_group_id};
pub use model::{DEFAULT_REFRESH_INTERVAL, Group, GroupLocation, Location, Member};

// 成员显示名缺失时的占位
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";
pub const DEFAULT_INACTIVE_THRESHOLD: Duration = Duration::from_secs(5 * 60);

/// Handlers and the expiry sweeper share one lock over the whole store, so
/// every logical operation sees groups, members and locations consistently.
pub type SharedStore = Arc<Mutex<Store>>;

/// In-memory groups, members and their latest locations.
pub struct Store {
    groups: HashMap<String, Group>,
    members: HashMap<String, Member>,
    locations: HashMap<String, Location>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            groups: HashMap::new(),
            members: HashMap::new(),
            locations: HashMap::new(),
            clock,
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    // ---------- 群组 ----------

    pub fn create_group(
        &mut self,
        name: Option<String>,
        refresh_interval: Option<Number>,
        expiry_hours: Option<f64>,
    ) -> Group {
        let groups = &self.groups;
        let id = generate_group_id(&mut rand::thread_rng(), |candidate| {
            groups.contains_key(candidate)
        });
        let created_at = self.now();

        let group = Group {
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Group {}", id)),
            created_at,
            expires_at: expiry_hours.and_then(|hours| expiry_from(created_at, hours)),
            refresh_interval: refresh_interval
                .unwrap_or_else(|| Number::from(DEFAULT_REFRESH_INTERVAL)),
            id: id.clone(),
        };

        match group.expires_at {
            Some(expires_at) => tracing::info!(
                "Created group {} ({}), expires at {}",
                group.id,
                group.name,
                expires_at
            ),
            None => tracing::info!("Created group {} ({})", group.id, group.name),
        }

        self.groups.insert(id, group.clone());
        group
    }

    pub fn get_group(&self, group_id: &str) -> Option<&Group> {
        self.groups.get(group_id)
    }

    pub fn group_exists(&self, group_id: &str) -> bool {
        self.groups.contains_key(group_id)
    }

    /// Removes the group together with its members and their locations.
    /// Returns `false` when the group does not exist.
    pub fn delete_group(&mut self, group_id: &str) -> bool {
        if self.groups.remove(group_id).is_none() {
            return false;
        }

        let member_ids: Vec<String> = self
            .members
            .values()
            .filter(|m| m.group_id == group_id)
            .map(|m| m.id.clone())
            .collect();
        for member_id in &member_ids {
            self.members.remove(member_id);
            self.locations.remove(member_id);
        }
        // 成员被覆盖到别的群组后，旧位置仍挂在本群组下
        self.locations.retain(|_, l| l.group_id != group_id);

        tracing::info!(
            "Deleted group {} and {} members",
            group_id,
            member_ids.len()
        );
        true
    }

    // ---------- 成员 ----------

    /// Adds a member to an existing group. An existing member with the same
    /// id is overwritten; ids are the caller's responsibility.
    pub fn add_member(
        &mut self,
        group_id: &str,
        member_id: &str,
        display_name: &str,
    ) -> Option<Member> {
        if !self.group_exists(group_id) {
            return None;
        }

        let member = Member {
            id: member_id.to_string(),
            group_id: group_id.to_string(),
            display_name: display_name.to_string(),
            created_at: self.now(),
        };
        self.members.insert(member.id.clone(), member.clone());

        tracing::info!(
            "Member {} ({}) joined group {}",
            display_name,
            member_id,
            group_id
        );
        Some(member)
    }

    pub fn get_member(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    pub fn get_group_members(&self, group_id: &str) -> Vec<Member> {
        self.members
            .values()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect()
    }

    // ---------- 位置 ----------

    /// Stores the member's latest position. Returns `None` without touching
    /// anything when the member is unknown or belongs to another group.
    ///
    /// The first write fixes `updated_at`; later writes keep it and only
    /// replace coordinates and the sharing flag.
    pub fn update_location(
        &mut self,
        member_id: &str,
        group_id: &str,
        lat: f64,
        lng: f64,
        sharing_enabled: bool,
    ) -> Option<Location> {
        let display_name = match self.members.get(member_id) {
            Some(member) if member.group_id == group_id => member.display_name.clone(),
            _ => return None,
        };

        let updated_at = match self.locations.get(member_id) {
            Some(existing) => existing.updated_at,
            None => self.now(),
        };

        let location = Location {
            member_id: member_id.to_string(),
            group_id: group_id.to_string(),
            lat,
            lng,
            sharing_enabled,
            updated_at,
        };
        self.locations
            .insert(location.member_id.clone(), location.clone());

        tracing::debug!(
            "Updated location for {}: ({}, {}) [sharing: {}]",
            display_name,
            lat,
            lng,
            sharing_enabled
        );
        Some(location)
    }

    pub fn get_group_locations(&self, group_id: &str) -> Vec<GroupLocation> {
        self.locations
            .values()
            .filter(|l| l.group_id == group_id)
            .map(|l| GroupLocation {
                display_name: self
                    .members
                    .get(&l.member_id)
                    .map(|m| m.display_name.clone())
                    .unwrap_or_else(|| UNKNOWN_DISPLAY_NAME.to_string()),
                location: l.clone(),
            })
            .collect()
    }

    // ---------- 清理 ----------

    /// Drops every location whose `updated_at` is at least `threshold` old.
    ///
    /// `updated_at` never advances after the first write, so this measures
    /// time since a member started sharing, not time since the last update.
    pub fn cleanup_inactive_members(&mut self, threshold: Duration) -> usize {
        let Ok(threshold) = TimeDelta::from_std(threshold) else {
            return 0;
        };
        let now = self.now();
        let before = self.locations.len();

        self.locations
            .retain(|_, l| now.signed_duration_since(l.updated_at) < threshold);

        let cleaned = before - self.locations.len();
        if cleaned > 0 {
            tracing::info!("Cleaned up {} inactive member locations", cleaned);
        }
        cleaned
    }

    pub fn cleanup_expired_groups(&mut self) -> usize {
        let now = self.now();
        let expired: Vec<String> = self
            .groups
            .values()
            .filter(|g| g.expires_at.is_some_and(|expires_at| expires_at < now))
            .map(|g| g.id.clone())
            .collect();

        let cleaned = expired.iter().filter(|id| self.delete_group(id)).count();
        if cleaned > 0 {
            tracing::info!("Cleaned up {} expired groups", cleaned);
        }
        cleaned
    }
}

// 0、非有限值或溢出视为不过期；负数得到已经过去的时间，下一次清理即删除
fn expiry_from(created_at: DateTime<Utc>, hours: f64) -> Option<DateTime<Utc>> {
    if !hours.is_finite() || hours == 0.0 {
        return None;
    }
    let millis = (hours * 3_600_000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64).and_then(|delta| created_at.checked_add_signed(delta))
}
