use super::*;

#[test]
fn make_raw_clears_echo_and_canonical_mode() {
    let mut term = Termios::default();
    term.local_modes |= LocalModes::ECHO | LocalModes::ICANON | LocalModes::ISIG;
    term.input_modes |= InputModes::ICRNL | InputModes::IXON;
    term.output_modes |= OutputModes::OPOST;

    make_raw(&mut term);

    assert!(!term.local_modes.contains(LocalModes::ECHO));
    assert!(!term.local_modes.contains(LocalModes::ICANON));
    assert!(!term.local_modes.contains(LocalModes::ISIG));
    assert!(!term.input_modes.contains(InputModes::ICRNL));
    assert!(!term.input_modes.contains(InputModes::IXON));
    assert!(!term.output_modes.contains(OutputModes::OPOST));
}
