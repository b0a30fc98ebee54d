#[test]
fn compile_pass() {
    let t = trybuild::TestCases::new();
    t.pass("compile-pass/*.rs");
}
