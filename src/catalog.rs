//! Canonical enumeration tables and the invalid-literal set.
//!
//! These tables are the ground truth that generator annotation blocks are
//! replaced with. They are process-wide constants, loaded once and never
//! mutated at runtime. Values are kept as structured groups (label plus
//! ordered entries) rather than pre-formatted text so the rendered output is
//! composable and testable on its own.

/// A labelled run of values inside an enumeration table.
///
/// The label, when present, is rendered as a YAML comment above the group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumGroup {
    pub label: Option<&'static str>,
    pub values: &'static [&'static str],
}

/// A canonical enumeration for one domain category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumTable {
    /// Short name used in change records.
    pub name: &'static str,
    /// Optional `pattern:` value emitted on its own line before the `enum:`
    /// header, already quoted as it should appear in the document.
    pub pattern: Option<&'static str>,
    /// Whether rendered values are single-quoted.
    pub quoted: bool,
    pub groups: &'static [EnumGroup],
}

impl EnumTable {
    /// All values of the table in document order.
    pub fn values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().flat_map(|g| g.values.iter().copied())
    }

    /// Render the table as a YAML `enum:` block.
    ///
    /// `indent` is the indentation of the `enum:` header; group comments and
    /// list entries are placed two spaces deeper. The rendering carries no
    /// trailing newline so it can replace a span that ends mid-line.
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();
        if let Some(pattern) = self.pattern {
            out.push_str(indent);
            out.push_str("pattern: ");
            out.push_str(pattern);
            out.push('\n');
        }
        out.push_str(indent);
        out.push_str("enum:");
        for group in self.groups {
            if let Some(label) = group.label {
                out.push('\n');
                out.push_str(indent);
                out.push_str("  # ");
                out.push_str(label);
            }
            for value in group.values {
                out.push('\n');
                out.push_str(indent);
                out.push_str("  - ");
                if self.quoted {
                    out.push('\'');
                    out.push_str(value);
                    out.push('\'');
                } else {
                    out.push_str(value);
                }
            }
        }
        out
    }
}

/// NIST 800-53 rev 4 control acronyms, grouped by control family.
pub const CONTROL_ACRONYMS: EnumTable = EnumTable {
    name: "NIST 800-53 control acronym",
    pattern: None,
    quoted: false,
    groups: &[
        EnumGroup {
            label: Some("Access Control (AC)"),
            values: &[
                "AC-1", "AC-2", "AC-2(1)", "AC-2(2)", "AC-2(3)", "AC-2(4)", "AC-3", "AC-3(2)",
                "AC-4", "AC-5", "AC-6", "AC-6(1)", "AC-6(2)", "AC-7", "AC-8", "AC-10", "AC-11",
                "AC-12", "AC-14", "AC-17", "AC-17(1)", "AC-17(2)", "AC-18", "AC-19", "AC-20",
                "AC-21", "AC-22",
            ],
        },
        EnumGroup {
            label: Some("Audit and Accountability (AU)"),
            values: &[
                "AU-1", "AU-2", "AU-3", "AU-4", "AU-5", "AU-6", "AU-6(1)", "AU-6(3)", "AU-7",
                "AU-8", "AU-9", "AU-11", "AU-12",
            ],
        },
        EnumGroup {
            label: Some("Security Assessment (CA)"),
            values: &["CA-1", "CA-2", "CA-3", "CA-5", "CA-6", "CA-7", "CA-8", "CA-9"],
        },
        EnumGroup {
            label: Some("Configuration Management (CM)"),
            values: &[
                "CM-1", "CM-2", "CM-3", "CM-4", "CM-5", "CM-6", "CM-7", "CM-8", "CM-9", "CM-10",
                "CM-11",
            ],
        },
        EnumGroup {
            label: Some("Contingency Planning (CP)"),
            values: &[
                "CP-1", "CP-2", "CP-3", "CP-4", "CP-6", "CP-7", "CP-8", "CP-9", "CP-10",
            ],
        },
        EnumGroup {
            label: Some("Identification and Authentication (IA)"),
            values: &[
                "IA-1", "IA-2", "IA-2(1)", "IA-2(2)", "IA-2(3)", "IA-2(8)", "IA-2(11)", "IA-3",
                "IA-4", "IA-5", "IA-5(1)", "IA-5(2)", "IA-6", "IA-7", "IA-8",
            ],
        },
        EnumGroup {
            label: Some("Incident Response (IR)"),
            values: &["IR-1", "IR-2", "IR-3", "IR-4", "IR-5", "IR-6", "IR-7", "IR-8"],
        },
        EnumGroup {
            label: Some("Maintenance (MA)"),
            values: &["MA-1", "MA-2", "MA-3", "MA-4", "MA-5", "MA-6"],
        },
        EnumGroup {
            label: Some("Media Protection (MP)"),
            values: &["MP-1", "MP-2", "MP-3", "MP-4", "MP-5", "MP-6", "MP-7"],
        },
        EnumGroup {
            label: Some("Physical Protection (PE)"),
            values: &[
                "PE-1", "PE-2", "PE-3", "PE-4", "PE-5", "PE-6", "PE-8", "PE-9", "PE-10", "PE-12",
                "PE-13", "PE-14", "PE-15", "PE-16",
            ],
        },
        EnumGroup {
            label: Some("Planning (PL)"),
            values: &["PL-1", "PL-2", "PL-4", "PL-8"],
        },
        EnumGroup {
            label: Some("Personnel Security (PS)"),
            values: &["PS-1", "PS-2", "PS-3", "PS-4", "PS-5", "PS-6", "PS-7", "PS-8"],
        },
        EnumGroup {
            label: Some("Risk Assessment (RA)"),
            values: &["RA-1", "RA-2", "RA-3", "RA-5"],
        },
        EnumGroup {
            label: Some("System Acquisition (SA)"),
            values: &[
                "SA-1", "SA-2", "SA-3", "SA-4", "SA-5", "SA-8", "SA-9", "SA-10", "SA-11",
            ],
        },
        EnumGroup {
            label: Some("System Protection (SC)"),
            values: &[
                "SC-1", "SC-2", "SC-3", "SC-4", "SC-5", "SC-7", "SC-8", "SC-10", "SC-12", "SC-13",
                "SC-15", "SC-17", "SC-18", "SC-19", "SC-20", "SC-21", "SC-22", "SC-23", "SC-28",
                "SC-39",
            ],
        },
        EnumGroup {
            label: Some("System Integrity (SI)"),
            values: &[
                "SI-1", "SI-2", "SI-3", "SI-4", "SI-4(1)", "SI-4(2)", "SI-4(4)", "SI-4(5)",
                "SI-4(11)", "SI-5", "SI-6", "SI-7", "SI-8", "SI-10", "SI-11", "SI-12", "SI-16",
            ],
        },
        EnumGroup {
            label: Some("Program Management (PM)"),
            values: &[
                "PM-1", "PM-2", "PM-3", "PM-4", "PM-5", "PM-6", "PM-7", "PM-9", "PM-10", "PM-11",
            ],
        },
    ],
};

/// Valid six-digit CCI identifiers. Rendered single-quoted so YAML keeps the
/// leading zeros, with a `pattern:` constraint ahead of the enum.
pub const CCI_IDENTIFIERS: EnumTable = EnumTable {
    name: "six-digit CCI identifier",
    pattern: Some(r"'^\d{6}$'"),
    quoted: true,
    groups: &[EnumGroup {
        label: None,
        values: &[
            "000001", "000002", "000003", "000004", "000005", "000009", "000012", "000013",
            "000015", "000016", "000017", "000018", "000019", "000022", "000024", "000026",
            "000044", "000045", "000046", "000052", "000053", "000056", "000058", "000061",
            "000063", "000067", "000068", "000070", "000073", "000076", "000125", "000145",
            "000155", "000158", "000159", "000160", "000162", "000163", "000164", "000167",
            "000169", "000171", "000172", "000174", "000254", "000451", "000852", "001234",
            "001453", "001494", "001495", "001499", "001503", "001504", "001581", "001643",
            "001744", "001858", "001941", "002041", "002115", "002235", "002301", "002450",
            "002617", "002752", "002899", "003123", "003305", "003447", "003449", "003450",
        ],
    }],
};

/// Control identifiers known to be invalid (nonexistent families or
/// out-of-range numbers). List entries matching one of these exactly are
/// removed outright, regardless of context.
pub const INVALID_CONTROL_LITERALS: &[&str] = &["S-1", "S-23", "UA-16", "SI-56"];
