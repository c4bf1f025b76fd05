//! Component variants and installation
//!
//! Each shipped variant is addressed as `<language>/<style>` in the
//! source repository and carries a fixed file list; the fetcher pulls
//! those files individually and the copier writes them into the
//! consuming project.

pub mod copier;
pub mod fetcher;

pub use copier::install_component;
pub use fetcher::{ComponentFetcher, ComponentSource};

use crate::manifest::StyleChoice;

/// Files that make up each shipped component variant
pub fn variant_files(is_tsx: bool, style: StyleChoice) -> &'static [&'static str] {
    match (is_tsx, style) {
        (true, StyleChoice::Tailwind) => &[
            "Calendar.tsx",
            "utils.ts",
            "const/const.tsx",
            "body/CalendarBody.tsx",
            "body/cell-style-helper/large-size/large-cva.ts",
            "body/cell-style-helper/small-size/small-cva.ts",
            "body/cell-style-helper/small-size/small-size-helper-style.ts",
            "days/CalendarDays.tsx",
            "headerController/HeaderController.tsx",
            "headerController/HeaderGrid.tsx",
            "svg/CalendarSvgr.tsx",
        ],
        (true, StyleChoice::CssModules) => &[
            "Calendar.tsx",
            "utils.ts",
            "body/CalendarBody.tsx",
            "body/cell/Cell.tsx",
            "body/cell-style-helper/large-size/large-size-style-helper.ts",
            "days/CalendarDays.tsx",
            "headerController/HeaderController.tsx",
            "headerController/HeaderGrid.tsx",
            "lib/format.utility.ts",
        ],
        (false, StyleChoice::Tailwind) => &["Calendar.jsx", "utils.js"],
        (false, StyleChoice::CssModules) => &[
            "Calendar.jsx",
            "utils.js",
            "body/CalendarBody.jsx",
            "body/cell/Cell.jsx",
            "body/cell-style-helper/large-size/large-cva.js",
            "body/cell-style-helper/small-size/small-cva.js",
            "headerController/HeaderController.jsx",
            "headerController/HeaderGrid.jsx",
            "lib/format.utility.js",
        ],
    }
}
