use crate::app::hooks::case;
use crate::app::result::FailureRecord;
use crate::app::suite::{Category, DurationClass, Suite};
use crate::system_path::create_valid_path_fragment;
use std::fs;

pub(super) fn suite() -> Suite {
    let mut suite = Suite::new("system-path", Category::Unit);
    suite.add_case(
        "valid-fragment",
        DurationClass::Quick,
        case(|ctx| {
            expect_eq!(ctx, create_valid_path_fragment("a: b"), "a__b", "colon and space");
            expect_eq!(ctx, create_valid_path_fragment("x<y>*"), "x_y__", "angle brackets");
        }),
    );
    suite.add_case(
        "temp-dir-filename",
        DurationClass::Quick,
        case(|ctx| {
            let path = match ctx.temp_dir_filename("scratch.txt") {
                Ok(path) => path,
                Err(err) => {
                    ctx.report_failure(FailureRecord::new(
                        "temp_dir_filename(\"scratch.txt\")",
                        err.to_string(),
                        "a writable path",
                        "temp dir is writable",
                        file!(),
                        line!(),
                    ));
                    return;
                }
            };
            let written = fs::write(&path, "scratch").and_then(|_| fs::read_to_string(&path));
            require_eq!(ctx, written.ok(), Some("scratch".to_owned()), "file round trip");
            expect_eq!(
                ctx,
                path.parent().and_then(|p| p.file_name()).map(|n| n.to_string_lossy().into_owned()),
                Some("temp-dir-filename".to_owned()),
                "per-case directory"
            );
        }),
    );
    suite
}
