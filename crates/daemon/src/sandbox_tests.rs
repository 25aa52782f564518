// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn id_map_format_matches_linux_uid_map_syntax() {
    assert_eq!(format_id_map(0), "0 0 1");
    assert_eq!(format_id_map(1000), "0 1000 1");
}

// `init()` itself requires CAP_SYS_ADMIN-equivalent unprivileged user namespaces and forks
// the process; it is exercised by the end-to-end scenarios in SPEC_FULL.md §8 rather than
// under the unit test harness.
