use serde::{Deserialize, Deserializer, Serialize};

/// One row of the asset report. The API omits or nulls fields freely, so every
/// field collapses to an empty string at deserialization time and is never an error.
/// The numeric keys are TDX custom-attribute ids: `153921` is the provisioning type,
/// `121007` is the write-in room.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Name", default, deserialize_with = "null_to_empty")]
    pub name: String,
    #[serde(rename = "SerialNumber", default, deserialize_with = "null_to_empty")]
    pub serial_number: String,
    #[serde(rename = "153921", default, deserialize_with = "null_to_empty")]
    pub provisioning_type: String,
    #[serde(rename = "OwningDepartmentName", default, deserialize_with = "null_to_empty")]
    pub owning_department_name: String,
    #[serde(rename = "LocationName", default, deserialize_with = "null_to_empty")]
    pub location_name: String,
    #[serde(rename = "LocationRoomName", default, deserialize_with = "null_to_empty")]
    pub location_room_name: String,
    #[serde(rename = "121007", default, deserialize_with = "null_to_empty")]
    pub write_in_room: String,
    #[serde(rename = "OwningCustomerEmail", default, deserialize_with = "null_to_empty")]
    pub owning_customer_email: String,
}

/// Report resource as returned by `GET /reports/{id}?withData=True`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportEnvelope {
    #[serde(rename = "DataRows", default)]
    pub data_rows: Vec<ReportRow>,
}

/// One output record, serialized in column order. The serde renames produce the
/// exact CSV header names the downstream automation expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroupRecord {
    pub asset_name: String,
    pub serial_number: String,
    pub primary_user: String,
    pub group_name_provisioning: String,
    pub group_name_dept: String,
    pub group_name_building: String,
    pub group_name_combo: String,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
