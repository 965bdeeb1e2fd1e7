//! Built-in World Manufacturer Identifier dataset
//!
//! Columns: WMI, manufacturer, make, country.

pub(super) const BUILTIN: &[(&str, &str, &str, &str)] = &[
    // North America
    ("1C3", "Chrysler", "Chrysler", "United States"),
    ("1C4", "Chrysler", "Jeep", "United States"),
    ("1C6", "Chrysler", "Ram", "United States"),
    ("1FA", "Ford Motor Company", "Ford", "United States"),
    ("1FD", "Ford Motor Company", "Ford", "United States"),
    ("1FM", "Ford Motor Company", "Ford", "United States"),
    ("1FT", "Ford Motor Company", "Ford", "United States"),
    ("1G1", "General Motors", "Chevrolet", "United States"),
    ("1G6", "General Motors", "Cadillac", "United States"),
    ("1GC", "General Motors", "Chevrolet", "United States"),
    ("1GT", "General Motors", "GMC", "United States"),
    ("1HG", "Honda of America Mfg.", "Honda", "United States"),
    ("1J4", "Chrysler", "Jeep", "United States"),
    ("1LN", "Ford Motor Company", "Lincoln", "United States"),
    ("1N4", "Nissan North America", "Nissan", "United States"),
    ("1N6", "Nissan North America", "Nissan", "United States"),
    ("1VW", "Volkswagen of America", "Volkswagen", "United States"),
    ("1YV", "Mazda (AutoAlliance International)", "Mazda", "United States"),
    ("19U", "Honda of America Mfg.", "Acura", "United States"),
    ("2FA", "Ford Motor Company of Canada", "Ford", "Canada"),
    ("2G1", "General Motors of Canada", "Chevrolet", "Canada"),
    ("2HG", "Honda of Canada Mfg.", "Honda", "Canada"),
    ("2HK", "Honda of Canada Mfg.", "Honda", "Canada"),
    ("2T1", "Toyota Motor Manufacturing Canada", "Toyota", "Canada"),
    ("2T3", "Toyota Motor Manufacturing Canada", "Toyota", "Canada"),
    ("3FA", "Ford Motor Company Mexico", "Ford", "Mexico"),
    ("3G1", "General Motors de Mexico", "Chevrolet", "Mexico"),
    ("3HG", "Honda de Mexico", "Honda", "Mexico"),
    ("3N1", "Nissan Mexicana", "Nissan", "Mexico"),
    ("3VW", "Volkswagen de Mexico", "Volkswagen", "Mexico"),
    ("4S3", "Subaru of Indiana Automotive", "Subaru", "United States"),
    ("4S4", "Subaru of Indiana Automotive", "Subaru", "United States"),
    ("4T1", "Toyota Motor Manufacturing Kentucky", "Toyota", "United States"),
    ("4T3", "Toyota Motor Manufacturing Kentucky", "Toyota", "United States"),
    ("4US", "BMW Manufacturing", "BMW", "United States"),
    ("5FN", "Honda Manufacturing of Alabama", "Honda", "United States"),
    ("5NP", "Hyundai Motor Manufacturing Alabama", "Hyundai", "United States"),
    ("5UX", "BMW Manufacturing", "BMW", "United States"),
    ("5YJ", "Tesla", "Tesla", "United States"),
    // Oceania and South America
    ("6G1", "GM Holden", "Holden", "Australia"),
    ("6T1", "Toyota Motor Corporation Australia", "Toyota", "Australia"),
    ("8AJ", "Toyota Argentina", "Toyota", "Argentina"),
    ("9BG", "General Motors do Brasil", "Chevrolet", "Brazil"),
    ("9BW", "Volkswagen do Brasil", "Volkswagen", "Brazil"),
    // Asia
    ("JA3", "Mitsubishi Motors", "Mitsubishi", "Japan"),
    ("JF1", "Subaru Corporation", "Subaru", "Japan"),
    ("JF2", "Subaru Corporation", "Subaru", "Japan"),
    ("JH4", "Honda Motor Co.", "Acura", "Japan"),
    ("JHM", "Honda Motor Co.", "Honda", "Japan"),
    ("JM1", "Mazda Motor Corporation", "Mazda", "Japan"),
    ("JN1", "Nissan Motor Co.", "Nissan", "Japan"),
    ("JN8", "Nissan Motor Co.", "Nissan", "Japan"),
    ("JS2", "Suzuki Motor Corporation", "Suzuki", "Japan"),
    ("JT2", "Toyota Motor Corporation", "Toyota", "Japan"),
    ("JTD", "Toyota Motor Corporation", "Toyota", "Japan"),
    ("JTE", "Toyota Motor Corporation", "Toyota", "Japan"),
    ("JTH", "Toyota Motor Corporation", "Lexus", "Japan"),
    ("KL1", "GM Korea", "Chevrolet", "South Korea"),
    ("KMH", "Hyundai Motor Company", "Hyundai", "South Korea"),
    ("KNA", "Kia Corporation", "Kia", "South Korea"),
    ("KND", "Kia Corporation", "Kia", "South Korea"),
    ("LFV", "FAW-Volkswagen", "Volkswagen", "China"),
    ("LRW", "Tesla Shanghai", "Tesla", "China"),
    ("LSV", "SAIC Volkswagen", "Volkswagen", "China"),
    ("MA3", "Maruti Suzuki India", "Suzuki", "India"),
    ("MAL", "Hyundai Motor India", "Hyundai", "India"),
    ("MR0", "Toyota Motor Thailand", "Toyota", "Thailand"),
    ("NMT", "Toyota Motor Manufacturing Turkey", "Toyota", "Turkey"),
    // Europe
    ("SAJ", "Jaguar Land Rover", "Jaguar", "United Kingdom"),
    ("SAL", "Jaguar Land Rover", "Land Rover", "United Kingdom"),
    ("SB1", "Toyota Motor Manufacturing UK", "Toyota", "United Kingdom"),
    ("SCC", "Lotus Cars", "Lotus", "United Kingdom"),
    ("SCF", "Aston Martin Lagonda", "Aston Martin", "United Kingdom"),
    ("SHH", "Honda of the UK Manufacturing", "Honda", "United Kingdom"),
    ("TMB", "Skoda Auto", "Skoda", "Czech Republic"),
    ("TRU", "Audi Hungaria", "Audi", "Hungary"),
    ("VF1", "Renault", "Renault", "France"),
    ("VF3", "Peugeot", "Peugeot", "France"),
    ("VF7", "Citroen", "Citroen", "France"),
    ("VNK", "Toyota Motor Manufacturing France", "Toyota", "France"),
    ("VSS", "SEAT", "SEAT", "Spain"),
    ("W0L", "Opel", "Opel", "Germany"),
    ("WAU", "Audi AG", "Audi", "Germany"),
    ("WBA", "BMW AG", "BMW", "Germany"),
    ("WBS", "BMW M GmbH", "BMW", "Germany"),
    ("WDB", "Mercedes-Benz AG", "Mercedes-Benz", "Germany"),
    ("WDD", "Mercedes-Benz AG", "Mercedes-Benz", "Germany"),
    ("WF0", "Ford-Werke GmbH", "Ford", "Germany"),
    ("WMW", "BMW AG", "MINI", "Germany"),
    ("WP0", "Porsche AG", "Porsche", "Germany"),
    ("WP1", "Porsche AG", "Porsche", "Germany"),
    ("WVG", "Volkswagen AG", "Volkswagen", "Germany"),
    ("WVW", "Volkswagen AG", "Volkswagen", "Germany"),
    ("YS3", "Saab Automobile", "Saab", "Sweden"),
    ("YV1", "Volvo Cars", "Volvo", "Sweden"),
    ("ZAR", "Alfa Romeo", "Alfa Romeo", "Italy"),
    ("ZFA", "Fiat", "Fiat", "Italy"),
    ("ZFF", "Ferrari", "Ferrari", "Italy"),
    ("ZHW", "Lamborghini", "Lamborghini", "Italy"),
];
