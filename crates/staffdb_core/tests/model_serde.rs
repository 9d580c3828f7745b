use chrono::NaiveDate;
use rust_decimal::Decimal;
use staffdb_core::{Department, Employee, EntityValidationError, FullName, Position};
use std::str::FromStr;

fn jane_doe() -> Employee {
    Employee::new(
        7,
        FullName::new("Jane", "Doe"),
        Position::Manager,
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
        Decimal::from_str("5000.00").unwrap(),
    )
    .unwrap()
    .with_department(2)
}

#[test]
fn employee_new_sets_absent_references() {
    let employee = Employee::new(
        1,
        FullName::new("Ann", "Lee"),
        Position::Clerk,
        NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
        Decimal::ZERO,
    )
    .unwrap();

    assert_eq!(employee.manager_id, None);
    assert_eq!(employee.department_id, None);
    assert_eq!(employee.full_name.middle_name, None);
}

#[test]
fn employee_new_rejects_reserved_id_and_negative_salary() {
    let name = FullName::new("Ann", "Lee");
    let hired = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();

    let err = Employee::new(0, name.clone(), Position::Clerk, hired, Decimal::ONE).unwrap_err();
    assert_eq!(err, EntityValidationError::ZeroId { entity: "employee" });

    let err = Employee::new(1, name, Position::Clerk, hired, Decimal::NEGATIVE_ONE).unwrap_err();
    assert_eq!(err, EntityValidationError::NegativeSalary(Decimal::NEGATIVE_ONE));
}

#[test]
fn employee_serialization_uses_expected_wire_fields() {
    let mut employee = jane_doe();
    employee.full_name.middle_name = Some("Q".to_string());

    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["full_name"]["first_name"], "Jane");
    assert_eq!(json["full_name"]["middle_name"], "Q");
    assert_eq!(json["position"], "MANAGER");
    assert_eq!(json["hired"], "2020-01-15");
    assert_eq!(json["salary"], "5000.00");
    assert_eq!(json["manager_id"], serde_json::Value::Null);
    assert_eq!(json["department_id"], 2);

    let decoded: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, employee);
}

#[test]
fn deserialize_rejects_zero_reference() {
    let value = serde_json::json!({
        "id": 3,
        "full_name": { "first_name": "Sam", "last_name": "Ray", "middle_name": null },
        "position": "CLERK",
        "hired": "2018-02-01",
        "salary": "10",
        "manager_id": 0,
        "department_id": null
    });

    let err = serde_json::from_value::<Employee>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("employee.manager_id must be None instead of Some(0)"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_unknown_position() {
    let value = serde_json::json!({
        "id": 3,
        "full_name": { "first_name": "Sam", "last_name": "Ray", "middle_name": null },
        "position": "JANITOR",
        "hired": "2018-02-01",
        "salary": "10",
        "manager_id": null,
        "department_id": null
    });

    assert!(serde_json::from_value::<Employee>(value).is_err());
}

#[test]
fn department_round_trips_and_validates() {
    let department = Department::new(2, "Sales", "NYC").unwrap();
    let json = serde_json::to_value(&department).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "id": 2, "name": "Sales", "location": "NYC" })
    );
    assert_eq!(
        serde_json::from_value::<Department>(json).unwrap(),
        department
    );

    let zero = serde_json::json!({ "id": 0, "name": "X", "location": "Y" });
    assert!(serde_json::from_value::<Department>(zero).is_err());
}
