use crate::models::{DeviceGroupRecord, ReportRow};

pub const GROUP_PREFIX: &str = "Intune - Win - ";

/// Provisioning type that marks a device as belonging to one person rather than a
/// shared space.
pub const SINGLE_USER: &str = "Single User";

/// Derives the group-name record for one report row.
///
/// Pure function of the row contents; callers write exactly one output record per
/// input row, in input order. Any provisioning type other than "Single User" takes
/// the shared-device branch, there is no whitelist of known types.
pub fn derive_groups(row: &ReportRow) -> DeviceGroupRecord {
    let provisioning_type = row.provisioning_type.as_str();
    // Department names feed SQL run by the downstream automation, so quotes are doubled.
    let department = escape_single_quotes(&row.owning_department_name);
    let building = row.location_name.as_str();
    let single_user = provisioning_type == SINGLE_USER;

    // Shared machines are targeted by location. Single User machines are too numerous
    // for per-room groups; they carry a primary user instead.
    let room = if single_user {
        String::new()
    } else if !row.location_room_name.is_empty() {
        row.location_room_name.clone()
    } else {
        row.write_in_room.clone()
    };

    let primary_user = if single_user {
        row.owning_customer_email.clone()
    } else {
        String::new()
    };

    let group_name_combo = if single_user {
        String::new()
    } else {
        format!(
            "{}{} - {} - {} - {}",
            GROUP_PREFIX,
            provisioning_type,
            department,
            first_token(building),
            room
        )
    };

    DeviceGroupRecord {
        asset_name: row.name.clone(),
        serial_number: row.serial_number.clone(),
        primary_user,
        group_name_provisioning: format!("{}{}", GROUP_PREFIX, provisioning_type),
        group_name_dept: format!("{}{}", GROUP_PREFIX, department),
        group_name_building: format!("{}{}", GROUP_PREFIX, building),
        group_name_combo,
    }
}

/// Doubles every single quote for SQL-style downstream consumption.
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "''")
}

/// First whitespace-separated token; an empty or all-whitespace string yields "".
pub fn first_token(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or_default()
}
