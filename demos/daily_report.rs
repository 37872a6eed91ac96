//! Print the sample steps and training reports

fn main() {
    print!("{}", stride_calc::steps_report("678,0h50m", 70.0, 170.0));
    println!();

    for record in ["3456,Ходьба,3h00m", "1000,Велосипед,1h0m", "500,Плавание,1h"] {
        match stride_calc::training_report(record, 75.0, 175.0) {
            Ok(report) => println!("{report}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}
