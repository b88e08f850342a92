// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup that Diesel's DSL cannot express.
//!
//! Everything here runs once per connection: opening, PRAGMA configuration
//! and migrations. Domain queries live in `queries/` and `mutations/`.

pub mod sqlite;
