use std::error::Error;

use sahayak_pdf::{DocumentGenerator, FormTemplate};

fn main() -> Result<(), Box<dyn Error>> {
    let generator = DocumentGenerator::new();
    if let Some(warning) = generator.font().warning() {
        eprintln!("warning: {}", warning);
    }

    for form in FormTemplate::ALL {
        let pdf = generator.generate(&form.request())?;
        std::fs::write(form.file_name(), &pdf.bytes)?;
        println!("Generated {} ({} bytes)", form.file_name(), pdf.bytes.len());
    }
    Ok(())
}
