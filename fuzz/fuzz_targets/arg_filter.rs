#![no_main]

use libfuzzer_sys::fuzz_target;
use clang_shim::compiler_path::clang_cl_path_os;
use clang_shim::filter::ArgFilter;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

fuzz_target!(|data: &[u8]| {
    // Raw argv bytes, UTF-8 or not; neither the filter nor the path rewrite may panic
    let token = OsStr::from_bytes(data);
    if let Some(out) = ArgFilter::builtin().apply_os(token) {
        assert!(!out.is_empty());
        assert!(!out.as_bytes().contains(&b'\\'));
    }
    let _ = clang_cl_path_os(token);
});
