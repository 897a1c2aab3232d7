//! Accounts, students and teaching staff

use chrono::NaiveDate;

crate::entity! {
    /// Staff account able to sign in to the administration system.
    User / InsertUser => USERS("users") {
        username("username"): String, unique;
        /// Stored credential, never returned to clients by the read paths
        password("password"): String;
        full_name("fullName"): String;
        role("role"): String = Text("staff");
        mobile_number("mobileNumber"): Option<String>;
        email("email"): Option<String>;
        active("active"): Option<bool> = Boolean(true);
    }
}

crate::entity! {
    /// Enrolled student.
    Student / InsertStudent => STUDENTS("students") {
        /// Institution-issued student number
        student_id("studentId"): String, unique;
        full_name("fullName"): String;
        father_name("fatherName"): String;
        mother_name("motherName"): String;
        date_of_birth("dateOfBirth"): Option<NaiveDate>;
        class_name("className"): String;
        roll_number("rollNumber"): Option<String>;
        address("address"): Option<String>;
        mobile_number("mobileNumber"): Option<String>;
        guardian_mobile("guardianMobile"): Option<String>;
        admission_date("admissionDate"): NaiveDate;
        status("status"): Option<String> = Text("active");
    }
}

crate::entity! {
    /// Member of the teaching staff.
    Teacher / InsertTeacher => TEACHERS("teachers") {
        teacher_id("teacherId"): String, unique;
        full_name("fullName"): String;
        father_name("fatherName"): Option<String>;
        qualification("qualification"): Option<String>;
        specialization("specialization"): Option<String>;
        joining_date("joiningDate"): NaiveDate;
        address("address"): Option<String>;
        mobile_number("mobileNumber"): String;
        email("email"): Option<String>;
        salary("salary"): Option<f64>;
        status("status"): Option<String> = Text("active");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Entity;
    use serde_json::json;

    #[test]
    fn test_user_role_defaults_to_staff() {
        let user = InsertUser::validate(&json!({
            "username": "admin",
            "password": "secret",
            "fullName": "Office Admin"
        }))
        .unwrap();
        assert_eq!(user.role, "staff");
        assert_eq!(user.active, Some(true));
    }

    #[test]
    fn test_user_role_cannot_be_null() {
        let err = InsertUser::validate(&json!({
            "username": "admin",
            "password": "secret",
            "fullName": "Office Admin",
            "role": null
        }))
        .unwrap_err();
        assert_eq!(err.field(), "role");
    }

    #[test]
    fn test_teacher_salary_accepts_integers() {
        let teacher = InsertTeacher::validate(&json!({
            "teacherId": "T-01",
            "fullName": "Abdul Karim",
            "joiningDate": "2019-07-01",
            "mobileNumber": "01700000000",
            "salary": 15000
        }))
        .unwrap();
        assert_eq!(teacher.salary, Some(15000.0));
        assert_eq!(teacher.status.as_deref(), Some("active"));
    }

    #[test]
    fn test_unique_fields_declared() {
        let unique: Vec<_> = Student::schema().unique_fields().map(|f| f.name).collect();
        assert_eq!(unique, vec!["studentId"]);
        let unique: Vec<_> = User::schema().unique_fields().map(|f| f.name).collect();
        assert_eq!(unique, vec!["username"]);
    }
}
