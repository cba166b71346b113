//! Department grouping over the employee sheet.

use std::collections::BTreeMap;

use crate::models::employee::Employee;

/// Bucket for records whose department cell is blank.
pub const UNKNOWN_DEPARTMENT: &str = "Unknown";

/// Groups records by department name. Buckets come back in alphabetical
/// order; records within a bucket keep their storage order.
pub fn group_by_department(records: Vec<Employee>) -> BTreeMap<String, Vec<Employee>> {
    let mut groups: BTreeMap<String, Vec<Employee>> = BTreeMap::new();
    for record in records {
        let key = if record.department.trim().is_empty() {
            UNKNOWN_DEPARTMENT.to_string()
        } else {
            record.department.clone()
        };
        groups.entry(key).or_default().push(record);
    }
    groups
}
