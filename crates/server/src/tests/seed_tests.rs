// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use registrar_persistence::Persistence;

use crate::seed::seed_demo_catalog;

#[test]
fn test_seed_populates_empty_catalog_once() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    seed_demo_catalog(&mut persistence).unwrap();
    seed_demo_catalog(&mut persistence).unwrap();

    assert_eq!(persistence.count_programs().unwrap(), 1);
    let courses = persistence.list_courses_for_program(1).unwrap();
    assert_eq!(courses.len(), 6);
    assert!(courses.iter().all(|c| c.lecturer_name.as_deref() == Some("Budi Santoso")));
}
