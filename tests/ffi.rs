mod common;

use std::ffi::CStr;

use zstd_bridge::ffi::*;
use zstd_bridge::{ErrorKind, ResultCode};

#[test]
fn test_abi_matches_rust_api() {
    let data = common::text(20_000);
    let bound = zstd_bridge_compress_bound(data.len());
    assert_eq!(bound, zstd_bridge::compress_bound(data.len()));

    let mut expected = vec![0u8; bound];
    let expected_code = zstd_bridge::compress(&data, &mut expected, 5).into_raw();

    let mut copied = vec![0u8; bound];
    let mut pinned = vec![0u8; bound];
    let copied_code =
        unsafe { zstd_bridge_compress(data.as_ptr(), data.len(), copied.as_mut_ptr(), copied.len(), 5) };
    let pinned_code =
        unsafe { zstd_bridge_compress_critical(data.as_ptr(), data.len(), pinned.as_mut_ptr(), pinned.len(), 5) };

    assert!(!zstd_bridge_is_error(copied_code));
    assert_eq!(copied_code, expected_code);
    assert_eq!(pinned_code, expected_code);
    assert_eq!(copied[..copied_code], expected[..expected_code]);
    assert_eq!(pinned[..pinned_code], expected[..expected_code]);
    common::assert_round_trip(&data, &copied[..copied_code]);
}

#[test]
fn test_small_destination_through_abi() {
    let data = common::noise(1000);
    let mut dst = vec![0u8; 10];
    let code = unsafe { zstd_bridge_compress(data.as_ptr(), data.len(), dst.as_mut_ptr(), dst.len(), 3) };

    assert!(zstd_bridge_is_error(code));
    assert_eq!(zstd_bridge_get_error_code(code), zstd_bridge_err_dst_size_too_small());

    let name = zstd_bridge_get_error_name(code);
    let label = unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned();
    unsafe { zstd_bridge_string_free(name) };
    assert_eq!(label, zstd_bridge::get_error_name(ResultCode::from_raw(code)));
}

#[test]
fn test_error_accessors() {
    let accessors: [(extern "C" fn() -> u32, ErrorKind); 23] = [
        (zstd_bridge_err_no_error, ErrorKind::NoError),
        (zstd_bridge_err_generic, ErrorKind::Generic),
        (zstd_bridge_err_prefix_unknown, ErrorKind::PrefixUnknown),
        (zstd_bridge_err_version_unsupported, ErrorKind::VersionUnsupported),
        (zstd_bridge_err_frame_parameter_unsupported, ErrorKind::FrameParameterUnsupported),
        (zstd_bridge_err_frame_parameter_window_too_large, ErrorKind::FrameParameterWindowTooLarge),
        (zstd_bridge_err_corruption_detected, ErrorKind::CorruptionDetected),
        (zstd_bridge_err_checksum_wrong, ErrorKind::ChecksumWrong),
        (zstd_bridge_err_dictionary_corrupted, ErrorKind::DictionaryCorrupted),
        (zstd_bridge_err_dictionary_wrong, ErrorKind::DictionaryWrong),
        (zstd_bridge_err_dictionary_creation_failed, ErrorKind::DictionaryCreationFailed),
        (zstd_bridge_err_parameter_unsupported, ErrorKind::ParameterUnsupported),
        (zstd_bridge_err_parameter_out_of_bound, ErrorKind::ParameterOutOfBound),
        (zstd_bridge_err_table_log_too_large, ErrorKind::TableLogTooLarge),
        (zstd_bridge_err_max_symbol_value_too_large, ErrorKind::MaxSymbolValueTooLarge),
        (zstd_bridge_err_max_symbol_value_too_small, ErrorKind::MaxSymbolValueTooSmall),
        (zstd_bridge_err_stage_wrong, ErrorKind::StageWrong),
        (zstd_bridge_err_init_missing, ErrorKind::InitMissing),
        (zstd_bridge_err_memory_allocation, ErrorKind::MemoryAllocation),
        (zstd_bridge_err_work_space_too_small, ErrorKind::WorkSpaceTooSmall),
        (zstd_bridge_err_dst_size_too_small, ErrorKind::DstSizeTooSmall),
        (zstd_bridge_err_src_size_wrong, ErrorKind::SrcSizeWrong),
        (zstd_bridge_err_dst_buffer_null, ErrorKind::DstBufferNull),
    ];
    assert_eq!(accessors.len(), ErrorKind::ALL.len());

    for (accessor, kind) in accessors.iter() {
        assert_eq!(accessor(), kind.code());

        let code = kind.result_code().into_raw();
        assert_eq!(zstd_bridge_is_error(code), *kind != ErrorKind::NoError);
        if *kind != ErrorKind::NoError {
            assert_eq!(zstd_bridge_get_error_code(code), accessor());
        }
    }
}

#[test]
fn test_version() {
    let version = zstd_bridge_version_number();
    assert!(version >= 10_000, "{}", version);
    assert_eq!(version, zstd_bridge::version_number());
}
