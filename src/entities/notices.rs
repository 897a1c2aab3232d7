//! Notice board and daily prayer schedule

use chrono::NaiveDate;

crate::entity! {
    /// Notice published on the board.
    Notice / InsertNotice => NOTICES("notices") {
        title("title"): String;
        content("content"): String;
        publish_date("publishDate"): NaiveDate;
        expire_date("expireDate"): Option<NaiveDate>;
        /// general, exam, holiday or event
        notice_type("noticeType"): Option<String> = Text("general");
        /// A specific class, or absent for all classes
        for_class("forClass"): Option<String>;
        created_by("createdBy"): String;
    }
}

crate::entity! {
    /// Prayer schedule for one day. Times are free text such as `04:45`.
    PrayerTime / InsertPrayerTime => PRAYER_TIMES("prayer_times") {
        date("date"): NaiveDate;
        fajr("fajr"): String;
        sunrise("sunrise"): Option<String>;
        dhuhr("dhuhr"): String;
        asr("asr"): String;
        maghrib("maghrib"): String;
        sunset("sunset"): Option<String>;
        isha("isha"): String;
    }
}
