fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 使用 vendored protoc，避免依賴系統安裝
    let protoc = protoc_bin_vendored::protoc_bin_path()?;
    std::env::set_var("PROTOC", protoc);

    tonic_build::compile_protos("proto/badatro.proto")?;
    Ok(())
}
