//! Fixed display names, badge classes and chart colors used by the
//! reporting endpoints. Fax types are the ten category codes every
//! document is filed under.

pub const FAX_TYPE_CODES: [&str; 10] = [
    "planning_training_operations",
    "needs_technical_affairs",
    "intelligence_modern_systems",
    "systems_research",
    "command_control_mechanisms",
    "organization_management",
    "military_secretariat",
    "officer_affairs",
    "information_warfare",
    "development_technical_security",
];

/// Arabic display name for a fax type code; unknown codes fall back to
/// the code itself.
pub fn fax_type_name(code: &str) -> &str {
    match code {
        "planning_training_operations" => "إتجاه التخطيط والتدريب والعمليات",
        "needs_technical_affairs" => "إتجاه الإحتياجات والشئون الفنية",
        "intelligence_modern_systems" => "إتجاه الذكاء والأنظمة الحديثة",
        "systems_research" => "إتجاه النظم والبحوث",
        "command_control_mechanisms" => "إتجاه ألية القيادة والسيطرة",
        "organization_management" => "فرع التنظيم والإدارة",
        "military_secretariat" => "فرع السكرتارية العسكرية",
        "officer_affairs" => "فرع شئون ضباط",
        "information_warfare" => "فرع حرب المعلومات",
        "development_technical_security" => "إتجاه التطوير والتأمين الفني",
        other => other,
    }
}

pub fn fax_type_badge(code: &str) -> &'static str {
    match code {
        "planning_training_operations" => "bg-primary",
        "needs_technical_affairs" => "bg-secondary",
        "intelligence_modern_systems" => "bg-success",
        "systems_research" => "bg-warning",
        "command_control_mechanisms" => "bg-danger",
        "organization_management" => "bg-info",
        "military_secretariat" => "bg-dark",
        "officer_affairs" => "bg-light text-dark",
        "information_warfare" => "bg-primary",
        "development_technical_security" => "bg-secondary",
        _ => "bg-secondary",
    }
}

/// Hex color backing a badge class in chart payloads.
pub fn badge_color(badge_class: &str) -> &'static str {
    match badge_class {
        "bg-primary" => "#007bff",
        "bg-secondary" => "#6c757d",
        "bg-success" => "#28a745",
        "bg-warning" => "#ffc107",
        "bg-danger" => "#dc3545",
        "bg-info" => "#17a2b8",
        "bg-dark" => "#343a40",
        "bg-light text-dark" => "#f8f9fa",
        _ => "#6c757d",
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "يناير",
        2 => "فبراير",
        3 => "مارس",
        4 => "أبريل",
        5 => "مايو",
        6 => "يونيو",
        7 => "يوليو",
        8 => "أغسطس",
        9 => "سبتمبر",
        10 => "أكتوبر",
        11 => "نوفمبر",
        12 => "ديسمبر",
        _ => "",
    }
}

pub fn status_name(status: &str) -> &str {
    match status {
        "sent" => "مُرسل",
        "received" => "مُستقبل",
        "pending" => "معلق",
        "draft" => "مسودة",
        "failed" => "فشل",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fax_type_has_a_name_and_badge() {
        for code in FAX_TYPE_CODES {
            assert_ne!(fax_type_name(code), code);
            assert!(fax_type_badge(code).starts_with("bg-"));
        }
    }

    #[test]
    fn unknown_code_falls_back_to_itself() {
        assert_eq!(fax_type_name("unfiled"), "unfiled");
        assert_eq!(fax_type_badge("unfiled"), "bg-secondary");
    }

    #[test]
    fn month_names_cover_the_year() {
        for month in 1..=12 {
            assert!(!month_name(month).is_empty());
        }
        assert_eq!(month_name(13), "");
    }
}
