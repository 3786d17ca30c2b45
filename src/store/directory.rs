//! The employee directory.
//!
//! Holds employee identities and their PINs in insertion order.

use uuid::Uuid;

use crate::calculation::{default_employee_code, generate_pin, validate_pin};
use crate::error::{KioskError, KioskResult};
use crate::models::{Employee, NewEmployee};

/// In-memory employee records.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
}

impl EmployeeDirectory {
    /// Creates a directory seeded with `employees`.
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Finds the employee whose PIN equals the trimmed input.
    ///
    /// Duplicate PINs are tolerated; the first match in insertion order wins.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_kiosk::models::NewEmployee;
    /// use attendance_kiosk::store::EmployeeDirectory;
    ///
    /// let mut directory = EmployeeDirectory::default();
    /// directory
    ///     .add(NewEmployee {
    ///         name: "Somchai".to_string(),
    ///         department: "Production".to_string(),
    ///         pin: Some("112233".to_string()),
    ///         ..NewEmployee::default()
    ///     })
    ///     .unwrap();
    ///
    /// assert!(directory.find_by_pin(" 112233").is_some());
    /// assert!(directory.find_by_pin("11223").is_none());
    /// ```
    pub fn find_by_pin(&self, pin: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.pin_matches(pin))
    }

    /// Looks up an employee by id.
    pub fn get(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    /// All employees in insertion order.
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the directory has no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Adds an employee, generating the code and PIN when they are omitted.
    ///
    /// Name and department must be non-blank, and a supplied PIN must be six
    /// digits. Duplicate codes and PINs are not checked.
    pub fn add(&mut self, new_employee: NewEmployee) -> KioskResult<&Employee> {
        let name = required_field("name", &new_employee.name)?;
        let department = required_field("department", &new_employee.department)?;

        let pin = match new_employee.pin.as_deref().map(str::trim) {
            Some(pin) if !pin.is_empty() => validate_pin(pin)?.to_string(),
            _ => generate_pin(),
        };

        let employee_code = match new_employee.employee_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_uppercase(),
            _ => default_employee_code(self.employees.len() + 1),
        };

        self.employees.push(Employee {
            id: Uuid::new_v4().to_string(),
            name,
            employee_code,
            department,
            position: new_employee.position.trim().to_string(),
            pin,
        });

        Ok(&self.employees[self.employees.len() - 1])
    }

    /// Replaces an employee's PIN.
    ///
    /// Returns `Ok(false)` when the id is unknown. A malformed PIN is refused
    /// before anything changes.
    pub fn update_pin(&mut self, employee_id: &str, new_pin: &str) -> KioskResult<bool> {
        let pin = validate_pin(new_pin)?;

        match self.employees.iter_mut().find(|e| e.id == employee_id) {
            Some(employee) => {
                employee.pin = pin.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes an employee. Attendance cascades are handled by the store.
    pub(super) fn remove(&mut self, employee_id: &str) -> Option<Employee> {
        let index = self.employees.iter().position(|e| e.id == employee_id)?;
        Some(self.employees.remove(index))
    }
}

fn required_field(field: &str, value: &str) -> KioskResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(KioskError::InvalidEmployee {
            field: field.to_string(),
            message: "must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_directory() -> EmployeeDirectory {
        EmployeeDirectory::new(vec![
            Employee {
                id: "1".to_string(),
                name: "Somchai".to_string(),
                employee_code: "EMP001".to_string(),
                department: "Production".to_string(),
                position: "Staff".to_string(),
                pin: "112233".to_string(),
            },
            Employee {
                id: "2".to_string(),
                name: "Somying".to_string(),
                employee_code: "EMP002".to_string(),
                department: "Accounting".to_string(),
                position: "Staff".to_string(),
                pin: "445566".to_string(),
            },
        ])
    }

    fn new_employee(name: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            department: "Sales".to_string(),
            position: "Lead".to_string(),
            ..NewEmployee::default()
        }
    }

    #[test]
    fn test_find_by_pin_trims_whitespace() {
        let directory = seeded_directory();
        let found = directory.find_by_pin(" 112233").unwrap();
        assert_eq!(found.id, "1");
    }

    #[test]
    fn test_find_by_pin_requires_exact_match() {
        let directory = seeded_directory();
        assert!(directory.find_by_pin("11223").is_none());
        assert!(directory.find_by_pin("999999").is_none());
    }

    #[test]
    fn test_add_generates_code_and_pin() {
        let mut directory = seeded_directory();
        let added = directory.add(new_employee("Wichai")).unwrap().clone();

        assert_eq!(added.employee_code, "EMP003");
        assert!(validate_pin(&added.pin).is_ok());
        assert!(!added.id.is_empty());
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn test_add_keeps_supplied_code_and_pin() {
        let mut directory = seeded_directory();
        let added = directory
            .add(NewEmployee {
                employee_code: Some(" emp100 ".to_string()),
                pin: Some("778899".to_string()),
                ..new_employee("Wichai")
            })
            .unwrap()
            .clone();

        assert_eq!(added.employee_code, "EMP100");
        assert_eq!(added.pin, "778899");
        assert_eq!(directory.find_by_pin("778899").unwrap().id, added.id);
    }

    #[test]
    fn test_add_treats_blank_pin_as_absent() {
        let mut directory = EmployeeDirectory::default();
        let added = directory
            .add(NewEmployee {
                pin: Some("  ".to_string()),
                ..new_employee("Wichai")
            })
            .unwrap();

        assert!(validate_pin(&added.pin).is_ok());
    }

    #[test]
    fn test_add_rejects_malformed_pin() {
        let mut directory = seeded_directory();
        let result = directory.add(NewEmployee {
            pin: Some("12345".to_string()),
            ..new_employee("Wichai")
        });

        assert!(matches!(result, Err(KioskError::InvalidPin { .. })));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut directory = seeded_directory();
        let result = directory.add(new_employee("   "));

        match result {
            Err(KioskError::InvalidEmployee { field, .. }) => assert_eq!(field, "name"),
            other => panic!("Expected InvalidEmployee error, got {:?}", other),
        }
    }

    #[test]
    fn test_add_tolerates_duplicate_pin() {
        let mut directory = seeded_directory();
        let result = directory.add(NewEmployee {
            pin: Some("112233".to_string()),
            ..new_employee("Wichai")
        });

        assert!(result.is_ok());
        assert_eq!(directory.find_by_pin("112233").unwrap().id, "1");
    }

    #[test]
    fn test_added_ids_are_unique() {
        let mut directory = EmployeeDirectory::default();
        let first = directory.add(new_employee("A")).unwrap().id.clone();
        let second = directory.add(new_employee("B")).unwrap().id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_update_pin_replaces_pin() {
        let mut directory = seeded_directory();
        assert!(directory.update_pin("1", "654321").unwrap());

        assert!(directory.find_by_pin("112233").is_none());
        assert_eq!(directory.find_by_pin("654321").unwrap().id, "1");
    }

    #[test]
    fn test_update_pin_unknown_id_is_noop() {
        let mut directory = seeded_directory();
        assert!(!directory.update_pin("missing", "654321").unwrap());
        assert!(directory.find_by_pin("654321").is_none());
    }

    #[test]
    fn test_update_pin_rejects_malformed_pin() {
        let mut directory = seeded_directory();
        let result = directory.update_pin("1", "65432x");

        assert!(matches!(result, Err(KioskError::InvalidPin { .. })));
        assert_eq!(directory.get("1").unwrap().pin, "112233");
    }

    #[test]
    fn test_remove_returns_removed_employee() {
        let mut directory = seeded_directory();
        let removed = directory.remove("2").unwrap();

        assert_eq!(removed.name, "Somying");
        assert!(directory.get("2").is_none());
        assert!(directory.remove("2").is_none());
    }
}
