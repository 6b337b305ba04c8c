// Copyright (C) 2026 Staffdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use staffdesk_domain::{DesignationAreaRecord, SkillAssignment};
use time::Date;
use time::macros::date;

pub fn designation_area(
    id: Option<i64>,
    user_id: i64,
    designation_id: i64,
    transition_date: Date,
) -> DesignationAreaRecord {
    DesignationAreaRecord {
        id,
        user_id,
        designation_id,
        area_id: None,
        transition_date,
    }
}

pub fn skill(employee_id: i64, skill_id: i64) -> SkillAssignment {
    SkillAssignment {
        employee_id,
        skill_id,
    }
}

pub fn default_date() -> Date {
    date!(2023 - 01 - 01)
}
