// SPDX-License-Identifier: MIT

//! `help` (SPEC_FULL.md §6): printed for `nsctl help` and for no arguments at all.

pub fn run() {
    println!("nsctl");
    println!("- help                    print this message");
    println!("- version                 print version");
    println!("- log [service]           monitor service's log");
    println!("- status [service]        show runtime status of services");
    println!("- start <service>         start service (configuration is read from stdin)");
    println!("- stop <service>          send SIGTERM to service");
    println!("- kill <service> <signal> send signal (number) to service");
    println!("- erase <service>         erase service (must be exited state)");
    println!("- send <service>          send text to service");
    println!("- wait <service>          wait for service to stop, then erase it");
    println!("- attach <service>        attach stdin/stdout to service's pty");
    println!("- shutdown                request daemon shutdown");
}
