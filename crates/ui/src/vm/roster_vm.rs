use draw_core::model::{EligibilitySet, Student, StudentId};
use services::SpinSnapshot;

const PLACEHOLDER: &str = "—";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRowVm {
    pub id: StudentId,
    pub name: String,
    pub present: bool,
}

#[must_use]
pub fn map_student_rows(students: &[Student], eligible: &EligibilitySet) -> Vec<StudentRowVm> {
    students
        .iter()
        .map(|student| StudentRowVm {
            id: student.id.clone(),
            name: student.name.clone(),
            present: eligible.contains(&student.id),
        })
        .collect()
}

#[must_use]
pub fn presence_label(rows: &[StudentRowVm]) -> String {
    let present = rows.iter().filter(|row| row.present).count();
    format!("{present} / {} présents", rows.len())
}

/// What the result panel shows once a spin has finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionVm {
    pub term_label: String,
    pub student_label: String,
    pub can_reveal: bool,
}

#[must_use]
pub fn map_selection(snapshot: &SpinSnapshot) -> SelectionVm {
    SelectionVm {
        term_label: snapshot
            .term
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), |term| term.term.clone()),
        student_label: snapshot
            .student
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), |student| student.name.clone()),
        can_reveal: snapshot.term.is_some(),
    }
}
