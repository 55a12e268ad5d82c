use packfft::display::{format_complex, format_real_parts};
use packfft::{FftBackend, FftError, FftHandler, Layout};

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn main() -> Result<(), FftError> {
    env_logger::init();
    let handler = FftHandler::new();

    // Test 1: real input
    let x = [1.2, 3.4, 5.6, 7.8];
    let dft = handler.forward_transform(&x, Layout::Real)?;
    println!("Test 1: Real input");
    println!();
    println!("FFT =");
    print_lines(&format_complex(&dft)?);
    println!();
    let idft = handler.inverse_transform(&dft)?;
    println!("IFFT =");
    print_lines(&format_real_parts(&idft)?);
    println!();

    // Test 2: complex input, 1 - 2i, ..., 7 + 8i
    let x = [1., -2., 3., 4., 5., -6., 7., 8.];
    let dft = handler.forward_transform(&x, Layout::Complex)?;
    println!("Test 2: Complex input");
    println!();
    println!("FFT =");
    print_lines(&format_complex(&dft)?);
    println!();
    let idft = handler.inverse_transform(&dft)?;
    println!("IFFT =");
    print_lines(&format_complex(&idft)?);

    handler.backend().cleanup();
    Ok(())
}
