//! Attendance, exams, results and the curriculum

use chrono::NaiveDate;

crate::entity! {
    /// One student's attendance mark for one day.
    Attendance / InsertAttendance => ATTENDANCE("attendance") {
        date("date"): NaiveDate;
        /// External student number, not a declared relationship
        student_id("studentId"): String;
        class_name("className"): String;
        /// present, absent or late
        status("status"): String;
        notes("notes"): Option<String>;
    }
}

crate::entity! {
    /// Scheduled examination for a class.
    Exam / InsertExam => EXAMS("exams") {
        exam_name("examName"): String;
        /// Monthly, Quarterly, Half-yearly or Annual
        exam_type("examType"): String;
        start_date("startDate"): NaiveDate;
        end_date("endDate"): NaiveDate;
        class_name("className"): String;
    }
}

crate::entity! {
    /// Marks of one student in one subject of an exam.
    ExamResult / InsertExamResult => EXAM_RESULTS("exam_results") {
        /// Identifier of an [`Exam`], stored as a plain value
        exam_id("examId"): i32;
        student_id("studentId"): String;
        subject_name("subjectName"): String;
        marks_obtained("marksObtained"): f64;
        total_marks("totalMarks"): f64;
        grade("grade"): Option<String>;
        remarks("remarks"): Option<String>;
    }
}

crate::entity! {
    /// Subject taught in a class.
    Subject / InsertSubject => SUBJECTS("subjects") {
        subject_name("subjectName"): String;
        subject_code("subjectCode"): Option<String>;
        class_name("className"): String;
        teacher_id("teacherId"): Option<String>;
        description("description"): Option<String>;
        books_required("booksRequired"): Option<String>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exam_result_exam_id_must_be_integer() {
        let payload = json!({
            "examId": "3",
            "studentId": "S-100",
            "subjectName": "Arabic",
            "marksObtained": 72.5,
            "totalMarks": 100
        });
        let err = InsertExamResult::validate(&payload).unwrap_err();
        assert_eq!(err.field(), "examId");
        assert_eq!(err.issues()[0].kind.code(), "type_mismatch");
    }

    #[test]
    fn test_exam_result_decodes() {
        let result = InsertExamResult::validate(&json!({
            "examId": 3,
            "studentId": "S-100",
            "subjectName": "Arabic",
            "marksObtained": 72.5,
            "totalMarks": 100
        }))
        .unwrap();
        assert_eq!(result.exam_id, 3);
        assert_eq!(result.total_marks, 100.0);
        assert_eq!(result.grade, None);
    }

    #[test]
    fn test_attendance_date_must_be_calendar_date() {
        let err = InsertAttendance::validate(&json!({
            "date": "yesterday",
            "studentId": "S-100",
            "className": "5",
            "status": "present"
        }))
        .unwrap_err();
        assert_eq!(err.field(), "date");
        assert_eq!(err.issues()[0].kind.code(), "invalid_date");
    }
}
