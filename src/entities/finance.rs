//! Student fees and institutional expenses

use chrono::NaiveDate;

crate::entity! {
    /// Fee charged to a student.
    Fee / InsertFee => FEES("fees") {
        student_id("studentId"): String;
        /// Tuition, Admission, Exam, ...
        fee_type("feeType"): String;
        amount("amount"): f64;
        due_date("dueDate"): NaiveDate;
        /// paid, unpaid or partial
        payment_status("paymentStatus"): Option<String> = Text("unpaid");
        payment_date("paymentDate"): Option<NaiveDate>;
        receipt_number("receiptNumber"): Option<String>;
        notes("notes"): Option<String>;
    }
}

crate::entity! {
    /// Money paid out by the institution.
    Expense / InsertExpense => EXPENSES("expenses") {
        /// Salary, Maintenance, Utilities, ...
        expense_type("expenseType"): String;
        amount("amount"): f64;
        expense_date("expenseDate"): NaiveDate;
        paid_to("paidTo"): String;
        paid_by("paidBy"): String;
        receipt_number("receiptNumber"): Option<String>;
        description("description"): Option<String>;
    }
}
