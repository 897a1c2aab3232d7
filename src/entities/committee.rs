//! Madrasa committee and union committee membership

use chrono::NaiveDate;

crate::entity! {
    /// Member of the madrasa managing committee.
    CommitteeMember / InsertCommitteeMember => COMMITTEE_MEMBERS("committee_members") {
        member_id("memberId"): String, unique;
        full_name("fullName"): String;
        /// Chairman, Secretary, Treasurer, Member, ...
        position("position"): String;
        joining_date("joiningDate"): NaiveDate;
        address("address"): Option<String>;
        mobile_number("mobileNumber"): String;
        email("email"): Option<String>;
        occupation("occupation"): Option<String>;
        term_start("termStart"): NaiveDate;
        term_end("termEnd"): Option<NaiveDate>;
        status("status"): Option<String> = Text("active");
        profile_image("profileImage"): Option<String>;
        notes("notes"): Option<String>;
    }
}

crate::entity! {
    /// Member of the union committee or of one of its ward committees.
    UnionCommitteeMember / InsertUnionCommitteeMember => UNION_COMMITTEE_MEMBERS("union_committee_members") {
        member_id("memberId"): String, unique;
        full_name("fullName"): String;
        position("position"): String;
        joining_date("joiningDate"): NaiveDate;
        address("address"): Option<String>;
        mobile_number("mobileNumber"): String;
        email("email"): Option<String>;
        occupation("occupation"): Option<String>;
        /// Ward 1-9; absent for the union-level committee
        ward_number("wardNumber"): Option<String>;
        ward_name("wardName"): Option<String>;
        /// union or ward
        committee_type("committeeType"): String;
        term_start("termStart"): NaiveDate;
        term_end("termEnd"): Option<NaiveDate>;
        status("status"): Option<String> = Text("active");
        profile_image("profileImage"): Option<String>;
        notes("notes"): Option<String>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_committee_member_status_default() {
        let member = InsertCommitteeMember::validate(&json!({
            "memberId": "CM-1",
            "fullName": "Haji Abdur Rahman",
            "position": "Chairman",
            "joiningDate": "2023-01-01",
            "mobileNumber": "01800000000",
            "termStart": "2023-01-01"
        }))
        .unwrap();
        assert_eq!(member.status.as_deref(), Some("active"));
        assert_eq!(member.term_end, None);
    }

    #[test]
    fn test_union_member_requires_committee_type() {
        let err = InsertUnionCommitteeMember::validate(&json!({
            "memberId": "UC-1",
            "fullName": "Abdul Malek",
            "position": "Secretary",
            "joiningDate": "2023-01-01",
            "mobileNumber": "01900000000",
            "termStart": "2023-01-01"
        }))
        .unwrap_err();
        assert_eq!(err.missing_fields(), vec!["committeeType"]);
    }
}
