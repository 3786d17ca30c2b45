//! Employee model and related types.
//!
//! This module defines the [`Employee`] record held by the directory, the
//! [`NewEmployee`] input used to add one, and the PIN-free
//! [`EmployeeProfile`] shown on the kiosk.

use serde::{Deserialize, Serialize};

/// An employee known to the kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique, immutable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display code such as "EMP001".
    pub employee_code: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Job position.
    pub position: String,
    /// The 6-digit credential used at the kiosk.
    pub pin: String,
}

impl Employee {
    /// Returns true if this employee's PIN equals the trimmed input exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_kiosk::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: "1".to_string(),
    ///     name: "Somchai".to_string(),
    ///     employee_code: "EMP001".to_string(),
    ///     department: "Production".to_string(),
    ///     position: "Staff".to_string(),
    ///     pin: "112233".to_string(),
    /// };
    /// assert!(employee.pin_matches(" 112233 "));
    /// assert!(!employee.pin_matches("11223"));
    /// ```
    pub fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin.trim()
    }
}

/// Input for adding an employee to the directory.
///
/// `employee_code` and `pin` are generated when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Job position.
    #[serde(default)]
    pub position: String,
    /// Optional display code; generated as `EMP###` when absent.
    #[serde(default)]
    pub employee_code: Option<String>,
    /// Optional PIN; a random 6-digit PIN is generated when absent.
    #[serde(default)]
    pub pin: Option<String>,
}

/// The public view of an employee, without the PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display code.
    pub employee_code: String,
    /// Department.
    pub department: String,
    /// Job position.
    pub position: String,
}

impl From<&Employee> for EmployeeProfile {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            employee_code: employee.employee_code.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
        }
    }
}
