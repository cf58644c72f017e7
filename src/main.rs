fn main() -> std::process::ExitCode {
  ads2vsc_lib::run()
}
