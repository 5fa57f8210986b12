//! Fixed reference data shown by the forms

use crate::domain::{AppointmentStatus, Gender, SelectOption};

/// A physician patients can pick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Doctor {
    pub name: &'static str,
    pub image: &'static str,
}

pub const DOCTORS: [Doctor; 9] = [
    Doctor { name: "Roumodip Das", image: "/assets/images/dr-green.png" },
    Doctor { name: "Aditi Das", image: "/assets/images/dr-cameron.png" },
    Doctor { name: "Pasupathi Sharma", image: "/assets/images/dr-livingston.png" },
    Doctor { name: "Kunal Kesh", image: "/assets/images/dr-peter.png" },
    Doctor { name: "Sneha Sarkar", image: "/assets/images/dr-powell.png" },
    Doctor { name: "Saptarshi banerjee", image: "/assets/images/dr-remirez.png" },
    Doctor { name: "Shruti Kiran", image: "/assets/images/dr-lee.png" },
    Doctor { name: "Priya Jha", image: "/assets/images/dr-cruz.png" },
    Doctor { name: "Nikunj Ranjan", image: "/assets/images/dr-sharma.png" },
];

pub const IDENTIFICATION_TYPES: [&str; 9] = [
    "Birth Certificate",
    "Driver's License",
    "Medical Insurance Card/Policy",
    "Military ID Card",
    "National Identity Card",
    "Passport",
    "State ID Card",
    "Student ID Card",
    "Voter ID Card",
];

pub const DEFAULT_IDENTIFICATION_TYPE: &str = "Birth Certificate";

pub const CALENDAR_ICON: &str = "/assets/icons/calendar.svg";
pub const USER_ICON: &str = "/assets/icons/user.svg";
pub const EMAIL_ICON: &str = "/assets/icons/email.svg";

pub fn gender_options() -> Vec<String> {
    Gender::ALL.iter().map(|g| g.as_str().to_string()).collect()
}

pub fn doctor_options() -> Vec<SelectOption> {
    DOCTORS
        .iter()
        .map(|d| SelectOption::new(d.name).with_image(d.image))
        .collect()
}

pub fn identification_type_options() -> Vec<SelectOption> {
    IDENTIFICATION_TYPES.iter().map(|t| SelectOption::new(*t)).collect()
}

pub fn find_doctor(name: &str) -> Option<&'static Doctor> {
    DOCTORS.iter().find(|d| d.name == name)
}

pub fn status_icon(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "/assets/icons/check.svg",
        AppointmentStatus::Pending => "/assets/icons/pending.svg",
        AppointmentStatus::Cancelled => "/assets/icons/cancelled.svg",
    }
}
