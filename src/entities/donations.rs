//! Donation collection for the madrasa and for the union committee

use chrono::NaiveDate;

crate::entity! {
    /// Donation collected for the madrasa.
    Donation / InsertDonation => DONATIONS("donations") {
        donor_name("donorName"): String;
        donor_mobile("donorMobile"): Option<String>;
        donor_address("donorAddress"): Option<String>;
        amount("amount"): f64;
        donation_date("donationDate"): NaiveDate;
        /// Monthly, One-time, Annual, ...
        donation_type("donationType"): String;
        receipt_number("receiptNumber"): String;
        collected_by("collectedBy"): String;
        purpose("purpose"): Option<String>;
        notes("notes"): Option<String>;
    }
}

crate::entity! {
    /// Monthly subscription collected by the union committee, optionally per ward.
    UnionDonation / InsertUnionDonation => UNION_DONATIONS("union_donations") {
        donor_name("donorName"): String;
        donor_mobile("donorMobile"): Option<String>;
        donor_address("donorAddress"): Option<String>;
        amount("amount"): f64;
        donation_date("donationDate"): NaiveDate;
        donation_type("donationType"): String;
        receipt_number("receiptNumber"): String;
        collected_by("collectedBy"): String;
        /// Ward 1-9
        ward_number("wardNumber"): Option<String>;
        ward_name("wardName"): Option<String>;
        purpose("purpose"): Option<String>;
        notes("notes"): Option<String>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_donation_receipt_number_required() {
        let err = InsertDonation::validate(&json!({
            "donorName": "Rahim",
            "amount": 1000,
            "donationDate": "2024-03-15",
            "donationType": "One-time",
            "collectedBy": "Secretary"
        }))
        .unwrap_err();
        assert_eq!(err.missing_fields(), vec!["receiptNumber"]);
    }

    #[test]
    fn test_union_donation_ward_optional() {
        let donation = InsertUnionDonation::validate(&json!({
            "donorName": "Karim",
            "amount": 200,
            "donationDate": "2024-03-15",
            "donationType": "Monthly",
            "receiptNumber": "U-17",
            "collectedBy": "Ward secretary",
            "wardNumber": "4"
        }))
        .unwrap();
        assert_eq!(donation.ward_number.as_deref(), Some("4"));
        assert_eq!(donation.ward_name, None);
    }
}
