//! Buffer assembly for the implementation and test files.

use goprint_core::Mode;
use tracing::debug;

use crate::{
    Result,
    generation::{
        ImportSpec, RUNTIME_IMPORT, TEST_BUILD_TAG, TEST_IMPORTS, Topics, dedup_imports,
        write_build_header, write_import_header, write_package_header,
    },
    printer::{Printer, SourceFile},
};

const BUFFER_CAPACITY: usize = 4096;

/// Assembled, unformatted output of one source file.
#[derive(Debug, Clone, Default)]
pub struct Assembled {
    /// Implementation file contents.
    pub main: Vec<u8>,
    /// Test file contents, present only when tests were requested.
    pub tests: Option<Vec<u8>>,
}

/// Build the implementation buffer and, if `mode` asks for it, the test buffer.
///
/// Headers are written first, then the body generator fills its sinks.
/// Topics are appended to the implementation buffer before the body.
pub fn generate(file: &impl SourceFile, mode: Mode) -> Result<Assembled> {
    let mut main = Vec::with_capacity(BUFFER_CAPACITY);
    write_package_header(&mut main, file.package());

    let imports = dedup_imports(
        std::iter::once(ImportSpec::new(RUNTIME_IMPORT).render())
            .chain(file.imports().iter().map(|import| import.render())),
    );
    write_import_header(&mut main, &imports);

    let mut tests = mode.wants_tests().then(|| {
        let mut buf = Vec::with_capacity(BUFFER_CAPACITY);
        write_build_header(&mut buf, &[TEST_BUILD_TAG]);
        write_package_header(&mut buf, file.package());
        write_import_header(&mut buf, &TEST_IMPORTS);
        buf
    });

    let mut topics = Topics::new();
    let mut body = Vec::with_capacity(BUFFER_CAPACITY);
    file.print_to(&mut Printer::new(
        mode,
        &mut topics,
        &mut body,
        tests.as_mut(),
    ))?;

    debug!(
        package = file.package(),
        imports = imports.len(),
        topics = topics.len(),
        tests = tests.is_some(),
        "assembled generated file"
    );

    main.extend_from_slice(&topics.to_bytes());
    main.extend_from_slice(&body);
    Ok(Assembled { main, tests })
}
