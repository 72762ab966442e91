// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection-level `SQLite` code that Diesel DSL cannot express: opening,
//! pragmas, migrations and `last_insert_rowid()`.

pub mod sqlite;
