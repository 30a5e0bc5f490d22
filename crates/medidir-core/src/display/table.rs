use crate::api::models::{Doctor, Hospital, Institution, MedicalTest};
use crate::core::controllers::{EmptyState, Pagination};
use crate::core::services::reference_service::FilterOptions;
use crate::core::services::types::{Notice, NoticeLevel};
use crate::utils::text::{join_non_empty, or_dash, truncate_text};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;

struct ColumnWidths {
    name: usize,
    detail: usize,
    place: usize,
}

/// Renders directory data as terminal tables.
pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| self.bold_header(h, Color::Cyan))
            .collect();
        table.set_header(cells);
        table
    }

    fn configure_table_width(&self, table: &mut Table) {
        let width = self
            .max_width
            .map(|w| if w > 20 { w - 6 } else { w.max(40) })
            .unwrap_or(80);
        table.set_width(width as u16);
    }

    fn get_responsive_column_widths(&self) -> ColumnWidths {
        match self.max_width.unwrap_or(80) {
            0..=59 => ColumnWidths {
                name: 14,
                detail: 10,
                place: 12,
            },
            60..=79 => ColumnWidths {
                name: 20,
                detail: 14,
                place: 16,
            },
            80..=119 => ColumnWidths {
                name: 28,
                detail: 20,
                place: 24,
            },
            _ => ColumnWidths {
                name: 40,
                detail: 30,
                place: 36,
            },
        }
    }

    pub fn render_doctor_list(&self, doctors: &[Doctor]) -> String {
        if doctors.is_empty() {
            return "No doctors found.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Name", "BMDC No", "Degrees", "Speciality", "Workplace"]);

        for doctor in doctors {
            let workplace = doctor
                .doctor_workplaces
                .first()
                .and_then(|w| w.place_name());
            table.add_row(vec![
                self.colored_cell(&doctor.id.to_string(), Color::Cyan),
                Cell::new(truncate_text(doctor.name(), widths.name)),
                Cell::new(or_dash(doctor.bmdc_no.as_deref())),
                Cell::new(truncate_text(&or_dash(doctor.degrees.as_deref()), widths.detail)),
                Cell::new(truncate_text(
                    &or_dash(doctor.specializations.as_deref()),
                    widths.detail,
                )),
                self.colored_cell(&truncate_text(&or_dash(workplace), widths.place), Color::DarkGrey),
            ]);
        }
        table.to_string()
    }

    pub fn render_hospital_list(&self, hospitals: &[Hospital]) -> String {
        if hospitals.is_empty() {
            return "No hospitals found.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Name", "Type", "Organization", "District", "Beds"]);

        for hospital in hospitals {
            table.add_row(vec![
                self.colored_cell(&hospital.id.to_string(), Color::Cyan),
                Cell::new(truncate_text(&hospital.name, widths.name)),
                Cell::new(truncate_text(
                    &or_dash(hospital.hospital_type.as_ref().map(|t| t.name.as_str())),
                    widths.detail,
                )),
                Cell::new(or_dash(
                    hospital.organization_type.as_ref().map(|t| t.name.as_str()),
                )),
                Cell::new(or_dash(hospital.district.as_ref().map(|d| d.name.as_str()))),
                Cell::new(hospital.number_of_bed.to_string()),
            ]);
        }
        table.to_string()
    }

    pub fn render_institution_list(&self, institutions: &[Institution]) -> String {
        if institutions.is_empty() {
            return "No institutes found.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Name", "Acronym", "Organization", "District", "Est."]);

        for institution in institutions {
            table.add_row(vec![
                self.colored_cell(&institution.id.to_string(), Color::Cyan),
                Cell::new(truncate_text(&institution.name, widths.name)),
                Cell::new(or_dash(institution.acronym.as_deref())),
                Cell::new(or_dash(
                    institution
                        .organization_type
                        .as_ref()
                        .map(|t| t.name.as_str()),
                )),
                Cell::new(or_dash(
                    institution.district.as_ref().map(|d| d.name.as_str()),
                )),
                Cell::new(
                    institution
                        .established_year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]);
        }
        table.to_string()
    }

    pub fn render_medical_tests(&self, tests: &[MedicalTest]) -> String {
        if tests.is_empty() {
            return "No medical tests found.".to_string();
        }
        let mut table = self.new_table(&["ID", "Test", "Price"]);
        for test in tests {
            table.add_row(vec![
                self.colored_cell(&test.id.to_string(), Color::Cyan),
                Cell::new(&test.name),
                Cell::new(
                    test.price
                        .map(|p| format!("{:.2}", p))
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]);
        }
        table.to_string()
    }

    /// Footer under a paged table. Page numbers are 1-based.
    pub fn render_page_footer(&self, pagination: &Pagination, rows_on_page: usize) -> String {
        let total_pages = pagination.total_pages().max(1);
        match pagination.row_range(rows_on_page) {
            Some((first, last)) => format!(
                "📄 Page {} of {} | {}-{} of {} records",
                pagination.display_page(),
                total_pages,
                first,
                last,
                pagination.total
            ),
            None => format!(
                "📄 Page {} of {} | {} records",
                pagination.display_page(),
                total_pages,
                pagination.total
            ),
        }
    }

    fn render_fields(&self, fields: &[(&str, String)]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);
        for (label, value) in fields {
            table.add_row(vec![self.bold_header(label, Color::Green), Cell::new(value)]);
        }
        table.to_string()
    }

    pub fn render_doctor_detail(&self, doctor: &Doctor) -> String {
        let profile = &doctor.profile;
        let mut output = format!("🩺 {}\n", doctor.name());
        output.push_str(&self.render_fields(&[
            ("ID", doctor.id.to_string()),
            ("BMDC No", or_dash(doctor.bmdc_no.as_deref())),
            (
                "Experience",
                doctor
                    .experience
                    .map(|y| format!("{} years", y))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            ("Degrees", or_dash(doctor.degrees.as_deref())),
            ("Specializations", or_dash(doctor.specializations.as_deref())),
            ("Email", or_dash(profile.email.as_deref())),
            ("Phone", or_dash(profile.phone.as_deref())),
            ("Blood group", or_dash(profile.blood_group.as_deref())),
        ]));

        if !doctor.doctor_workplaces.is_empty() {
            let mut table = self.new_table(&["#", "Designation", "Department", "Place", "From", "To"]);
            for workplace in &doctor.doctor_workplaces {
                table.add_row(vec![
                    Cell::new(workplace.id.to_string()),
                    Cell::new(or_dash(workplace.designation.as_deref())),
                    Cell::new(or_dash(workplace.department.as_deref())),
                    Cell::new(or_dash(workplace.place_name())),
                    Cell::new(or_dash(workplace.start_date.as_deref())),
                    Cell::new(or_dash(workplace.end_date.as_deref())),
                ]);
            }
            output.push_str("\n\nWorkplaces\n");
            output.push_str(&table.to_string());
        }

        if !doctor.doctor_degrees.is_empty() {
            let mut table = self.new_table(&["#", "Degree", "Speciality", "Institute", "Year"]);
            for degree in &doctor.doctor_degrees {
                table.add_row(vec![
                    Cell::new(degree.id.to_string()),
                    Cell::new(
                        degree
                            .degree
                            .abbreviation
                            .clone()
                            .unwrap_or_else(|| degree.degree.name.clone()),
                    ),
                    Cell::new(or_dash(degree.speciality.as_ref().map(|s| s.name.as_str()))),
                    Cell::new(or_dash(
                        degree.institution.as_ref().map(|i| i.name.as_str()),
                    )),
                    Cell::new(
                        degree
                            .passing_year
                            .map(|y| y.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ]);
            }
            output.push_str("\n\nDegrees\n");
            output.push_str(&table.to_string());
        }

        output
    }

    pub fn render_hospital_detail(&self, hospital: &Hospital) -> String {
        let district = hospital.district.as_ref();
        let mut output = format!("🏥 {}\n", hospital.name);
        output.push_str(&self.render_fields(&[
            ("ID", hospital.id.to_string()),
            ("Bangla name", or_dash(hospital.bn_name.as_deref())),
            (
                "Type",
                or_dash(hospital.hospital_type.as_ref().map(|t| t.name.as_str())),
            ),
            (
                "Organization",
                or_dash(hospital.organization_type.as_ref().map(|t| t.name.as_str())),
            ),
            ("Beds", hospital.number_of_bed.to_string()),
            (
                "Address",
                or_dash(Some(join_non_empty([
                    hospital.address.as_deref(),
                    district.map(|d| d.name.as_str()),
                    district.and_then(|d| d.division_name()),
                ]).as_str())),
            ),
            ("Website", or_dash(hospital.website_url.as_deref())),
            ("Services", or_dash(Some(hospital.services.join(", ").as_str()))),
            ("Facilities", or_dash(Some(hospital.facilities.join(", ").as_str()))),
        ]));
        output
    }

    pub fn render_institution_detail(&self, institution: &Institution) -> String {
        let district = institution.district.as_ref();
        let title = match &institution.acronym {
            Some(acronym) => format!("🎓 {} ({})\n", institution.name, acronym),
            None => format!("🎓 {}\n", institution.name),
        };
        let mut output = title;
        output.push_str(&self.render_fields(&[
            ("ID", institution.id.to_string()),
            ("Bangla name", or_dash(institution.bn_name.as_deref())),
            (
                "Established",
                institution
                    .established_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            (
                "Organization",
                or_dash(
                    institution
                        .organization_type
                        .as_ref()
                        .map(|t| t.name.as_str()),
                ),
            ),
            ("Beds", institution.number_of_bed.to_string()),
            (
                "Address",
                or_dash(Some(join_non_empty([
                    institution.address.as_deref(),
                    district.map(|d| d.name.as_str()),
                    district.and_then(|d| d.division_name()),
                ]).as_str())),
            ),
            ("Website", or_dash(institution.website_url.as_deref())),
        ]));
        output
    }

    /// The IDs a filter flag accepts, one table per reference list.
    pub fn render_filter_options(&self, options: &FilterOptions) -> String {
        let sections: [(&str, Vec<(u64, &str)>); 6] = [
            ("Hospitals", options.hospitals.iter().map(|h| (h.id, h.name.as_str())).collect()),
            ("Degrees", options.degrees.iter().map(|d| (d.id, d.name.as_str())).collect()),
            (
                "Specialities",
                options.specialities.iter().map(|s| (s.id, s.name.as_str())).collect(),
            ),
            ("Districts", options.districts.iter().map(|d| (d.id, d.name.as_str())).collect()),
            (
                "Hospital types",
                options.hospital_types.iter().map(|t| (t.id, t.name.as_str())).collect(),
            ),
            (
                "Organization types",
                options
                    .organization_types
                    .iter()
                    .map(|t| (t.id, t.name.as_str()))
                    .collect(),
            ),
        ];

        let mut blocks = Vec::new();
        for (title, rows) in sections {
            if rows.is_empty() {
                continue;
            }
            let mut table = self.new_table(&["ID", "Name"]);
            for (id, name) in rows {
                table.add_row(vec![
                    self.colored_cell(&id.to_string(), Color::Cyan),
                    Cell::new(name),
                ]);
            }
            blocks.push(format!("{}\n{}", title, table));
        }
        for (list, reason) in &options.failed {
            blocks.push(format!("⚠️ {:?} unavailable: {}", list, reason));
        }
        blocks.join("\n\n")
    }

    pub fn render_empty_state(&self, state: &EmptyState) -> String {
        format!("🔍 {}\n← Back to {}", state.message, state.back_link)
    }

    pub fn render_notice(&self, notice: &Notice) -> String {
        let icon = match notice.level {
            NoticeLevel::Success => "✅",
            NoticeLevel::Error => "❌",
        };
        format!("{} {}", icon, notice.message)
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}
