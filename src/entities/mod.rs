//! Domain entities of the madrasa administration system
//!
//! Each entity is independent; links such as an exam result's `examId` are
//! plain values with no declared relationship.

mod academics;
mod committee;
mod donations;
mod finance;
mod notices;
mod people;

pub use academics::{
    Attendance, Exam, ExamResult, InsertAttendance, InsertExam, InsertExamResult, InsertSubject,
    Subject, ATTENDANCE, EXAMS, EXAM_RESULTS, SUBJECTS,
};
pub use committee::{
    CommitteeMember, InsertCommitteeMember, InsertUnionCommitteeMember, UnionCommitteeMember,
    COMMITTEE_MEMBERS, UNION_COMMITTEE_MEMBERS,
};
pub use donations::{Donation, InsertDonation, InsertUnionDonation, UnionDonation, DONATIONS, UNION_DONATIONS};
pub use finance::{Expense, Fee, InsertExpense, InsertFee, EXPENSES, FEES};
pub use notices::{InsertNotice, InsertPrayerTime, Notice, PrayerTime, NOTICES, PRAYER_TIMES};
pub use people::{InsertStudent, InsertTeacher, InsertUser, Student, Teacher, User, STUDENTS, TEACHERS, USERS};

use crate::schema::EntitySchema;

/// Every declared entity, in declaration order.
pub static ALL_ENTITIES: [&EntitySchema; 15] = [
    &USERS,
    &STUDENTS,
    &TEACHERS,
    &ATTENDANCE,
    &EXAMS,
    &EXAM_RESULTS,
    &FEES,
    &EXPENSES,
    &SUBJECTS,
    &NOTICES,
    &PRAYER_TIMES,
    &DONATIONS,
    &COMMITTEE_MEMBERS,
    &UNION_COMMITTEE_MEMBERS,
    &UNION_DONATIONS,
];
