//! Printing warnings to stderr.

use std::sync::atomic::AtomicBool;

/// Switch for `warn!`; the `thememap` tool clears it on `--quiet`.
pub static DO_WARN: AtomicBool = AtomicBool::new(true);

#[macro_export]
macro_rules! warn {
    ($formatstr:literal $(,$arg:expr)*) => { {
        if $crate::warn::DO_WARN.load(std::sync::atomic::Ordering::SeqCst) {
            use std::io::Write;
            let mut outp = std::io::BufWriter::new(std::io::stderr().lock());
            let _ = write!(&mut outp, "W: ");
            let _ = write!(&mut outp, $formatstr $(,$arg)*);
            let _ = writeln!(&mut outp, " at {:?} line {}", file!(), line!());
            let _ = outp.flush();
        }
    } }
}

pub fn set_warnings(on: bool) {
    DO_WARN.store(on, std::sync::atomic::Ordering::SeqCst);
}
