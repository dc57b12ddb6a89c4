// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo catalog for `--seed-demo`.

use registrar_domain::{DegreeLevel, DomainError, WeeklyWindow};
use registrar_persistence::{NewCourse, Persistence, PersistenceError};
use tracing::info;

/// `(code, name, credits, capacity, day, start, end, min_semester)`
type DemoCourse = (
    &'static str,
    &'static str,
    u32,
    u32,
    &'static str,
    &'static str,
    &'static str,
    u8,
);

const DEMO_COURSES: [DemoCourse; 6] = [
    ("IF101", "Introduction to Programming", 3, 40, "monday", "08:00", "10:30", 1),
    ("IF102", "Discrete Mathematics", 3, 40, "tuesday", "08:00", "10:30", 1),
    ("IF201", "Data Structures", 3, 35, "monday", "13:00", "15:30", 2),
    ("IF202", "Database Systems", 3, 35, "wednesday", "10:00", "12:30", 3),
    ("IF301", "Operating Systems", 3, 30, "thursday", "08:00", "10:30", 4),
    ("IF302", "Computer Networks", 2, 30, "friday", "13:00", "14:40", 5),
];

/// Seeds one program with a lecturer and a small catalog.
///
/// Does nothing when any program already exists.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn seed_demo_catalog(persistence: &mut Persistence) -> Result<(), PersistenceError> {
    if persistence.count_programs()? > 0 {
        info!("Catalog already present, skipping demo seed");
        return Ok(());
    }

    let program_id: i64 =
        persistence.create_program("IF", "Informatics", "Engineering", DegreeLevel::S1)?;
    let lecturer_id: i64 =
        persistence.create_lecturer(None, "L-0001", "Budi Santoso", Some(program_id))?;

    for (code, name, credits, capacity, day, start, end, min_semester) in DEMO_COURSES {
        let window: WeeklyWindow = WeeklyWindow::parse(day, start, end)
            .map_err(|e: DomainError| PersistenceError::Other(e.to_string()))?;
        persistence.create_course(&NewCourse {
            code: code.to_string(),
            name: name.to_string(),
            credits,
            program_id,
            lecturer_id: Some(lecturer_id),
            capacity,
            window,
            min_semester,
        })?;
    }

    info!(
        program_id,
        courses = DEMO_COURSES.len(),
        "Seeded demo catalog"
    );
    Ok(())
}
